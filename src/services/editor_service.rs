use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{ComponentKind, Quiz},
        dto::{
            request::{ComponentPatch, StepPatch},
            response::EditorResponse,
        },
    },
    repositories::QuizRepository,
    services::mutations,
};

/// What the editor UI currently has highlighted; mutations move it around the
/// way the canvas expects (new things get selected, removals fall back).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub step_id: Option<String>,
    pub component_id: Option<String>,
}

/// Applies document mutations on behalf of the editor: load, transform with
/// the pure operations, persist, report the updated document plus selection.
pub struct EditorService {
    repository: Arc<dyn QuizRepository>,
}

impl EditorService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    async fn load(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))
    }

    async fn persist(&self, quiz: Quiz, selection: Selection) -> AppResult<EditorResponse> {
        let saved = self.repository.upsert(quiz).await?;
        Ok(EditorResponse {
            quiz: saved,
            selected_step_id: selection.step_id,
            selected_component_id: selection.component_id,
        })
    }

    pub async fn add_step(&self, quiz_id: &str, selection: Selection) -> AppResult<EditorResponse> {
        let quiz = self.load(quiz_id).await?;
        let (next, new_step_id) = mutations::add_step(&quiz);

        // the new step becomes current when nothing was selected
        let selection = Selection {
            step_id: selection.step_id.or(Some(new_step_id)),
            component_id: selection.component_id,
        };
        self.persist(next, selection).await
    }

    pub async fn remove_step(
        &self,
        quiz_id: &str,
        step_id: &str,
        selection: Selection,
    ) -> AppResult<EditorResponse> {
        let quiz = self.load(quiz_id).await?;
        let removed_index = quiz.step_index(step_id);
        let next = mutations::remove_step(&quiz, step_id)?;

        // selection falls back to the preceding step when the selected one
        // was removed; component selection is always cleared
        let step_selection = match selection.step_id {
            Some(selected) if selected == step_id => {
                let fallback = removed_index.map(|i| i.saturating_sub(1)).unwrap_or(0);
                next.steps.get(fallback).map(|s| s.id.clone())
            }
            other => other,
        };
        self.persist(
            next,
            Selection {
                step_id: step_selection,
                component_id: None,
            },
        )
        .await
    }

    pub async fn update_step(
        &self,
        quiz_id: &str,
        step_id: &str,
        patch: &StepPatch,
        selection: Selection,
    ) -> AppResult<EditorResponse> {
        let quiz = self.load(quiz_id).await?;
        let next = mutations::update_step(&quiz, step_id, patch)?;
        self.persist(next, selection).await
    }

    pub async fn add_component(
        &self,
        quiz_id: &str,
        step_id: &str,
        kind: ComponentKind,
        selection: Selection,
    ) -> AppResult<EditorResponse> {
        let quiz = self.load(quiz_id).await?;
        let (next, component_id) = mutations::add_component(&quiz, step_id, kind)?;

        self.persist(
            next,
            Selection {
                step_id: selection.step_id,
                component_id: Some(component_id),
            },
        )
        .await
    }

    pub async fn update_component(
        &self,
        quiz_id: &str,
        step_id: &str,
        component_id: &str,
        patch: &ComponentPatch,
        selection: Selection,
    ) -> AppResult<EditorResponse> {
        let quiz = self.load(quiz_id).await?;
        let next = mutations::update_component(&quiz, step_id, component_id, patch)?;
        self.persist(next, selection).await
    }

    pub async fn remove_component(
        &self,
        quiz_id: &str,
        step_id: &str,
        component_id: &str,
        selection: Selection,
    ) -> AppResult<EditorResponse> {
        let quiz = self.load(quiz_id).await?;
        let next = mutations::remove_component(&quiz, step_id, component_id)?;

        let component_selection = match selection.component_id {
            Some(selected) if selected == component_id => None,
            other => other,
        };
        self.persist(
            next,
            Selection {
                step_id: selection.step_id,
                component_id: component_selection,
            },
        )
        .await
    }

    pub async fn reorder_components(
        &self,
        quiz_id: &str,
        step_id: &str,
        from_index: usize,
        to_index: usize,
        selection: Selection,
    ) -> AppResult<EditorResponse> {
        let quiz = self.load(quiz_id).await?;
        let next = mutations::reorder_components(&quiz, step_id, from_index, to_index)?;
        self.persist(next, selection).await
    }
}
