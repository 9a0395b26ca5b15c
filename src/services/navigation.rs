//! Playback state machine: resolves interactions with the current step into
//! the next step or quiz completion, with a visit-history stack for "back".

use crate::{
    errors::{AppError, AppResult},
    models::domain::{ButtonAction, Component, Quiz, Step},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    OnStep(String),
    Finished,
}

/// Side effects of an interaction the caller has to carry out: opening an
/// external link, recording a picked option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionOutcome {
    pub external_url: Option<String>,
    pub picked_option_id: Option<String>,
}

/// One quiz-taking session over an immutable quiz snapshot.
pub struct QuizSession {
    quiz: Quiz,
    state: PlaybackState,
    history: Vec<String>,
}

impl QuizSession {
    /// Starts on the first step; a quiz without steps cannot be played.
    pub fn start(quiz: Quiz) -> AppResult<Self> {
        let first = quiz
            .steps
            .first()
            .ok_or_else(|| {
                AppError::ValidationError(format!("Quiz '{}' has no steps to play", quiz.id))
            })?
            .id
            .clone();

        Ok(Self {
            quiz,
            state: PlaybackState::OnStep(first.clone()),
            history: vec![first],
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    pub fn current_step(&self) -> Option<&Step> {
        match &self.state {
            PlaybackState::OnStep(step_id) => self.quiz.find_step(step_id),
            PlaybackState::Finished => None,
        }
    }

    /// Fraction of steps visited, capped at 1.0 so navigation cycles cannot
    /// report more than a full quiz.
    pub fn progress(&self) -> f64 {
        if self.is_finished() {
            return 1.0;
        }
        if self.quiz.steps.is_empty() {
            return 0.0;
        }
        (self.history.len() as f64 / self.quiz.steps.len() as f64).min(1.0)
    }

    pub fn can_go_back(&self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        match self.current_step() {
            Some(step) => step.allow_return,
            None => false,
        }
    }

    /// Resolves a button press or option pick on the current step.
    pub fn interact(
        &mut self,
        component_id: &str,
        option_id: Option<&str>,
    ) -> AppResult<InteractionOutcome> {
        let PlaybackState::OnStep(current_id) = self.state.clone() else {
            return Err(AppError::ValidationError(
                "Session is already finished".to_string(),
            ));
        };

        let step = self.quiz.find_step(&current_id).ok_or_else(|| {
            AppError::InternalError(format!("Current step '{}' vanished", current_id))
        })?;
        let component = step.find_component(component_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "Component with id '{}' not found on current step",
                component_id
            ))
        })?;

        match component {
            Component::Button(button) => {
                let action = button.action.clone();
                self.resolve_button(&current_id, action)
            }
            Component::Options(options) => {
                let option_id = option_id.ok_or_else(|| {
                    AppError::ValidationError(
                        "An option id is required to answer an Options component".to_string(),
                    )
                })?;
                let option = options
                    .options
                    .iter()
                    .find(|o| o.id == option_id)
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Option with id '{}' not found", option_id))
                    })?
                    .clone();

                let mut outcome = self.resolve_option_target(option.next_step_id.as_deref())?;
                outcome.picked_option_id = Some(option.id);
                Ok(outcome)
            }
            Component::Text(_) | Component::Image(_) | Component::Generic(_) => {
                Err(AppError::ValidationError(format!(
                    "Component '{}' is not interactive",
                    component_id
                )))
            }
        }
    }

    fn resolve_button(
        &mut self,
        current_id: &str,
        action: ButtonAction,
    ) -> AppResult<InteractionOutcome> {
        match action {
            ButtonAction::NextStep => {
                self.advance_from(current_id);
                Ok(InteractionOutcome::default())
            }
            ButtonAction::Submit => {
                self.state = PlaybackState::Finished;
                Ok(InteractionOutcome::default())
            }
            ButtonAction::ExternalLink { url } => Ok(InteractionOutcome {
                external_url: Some(url),
                picked_option_id: None,
            }),
            ButtonAction::GoToStep { step_id } => {
                if self.quiz.find_step(&step_id).is_some() {
                    self.transition_to(step_id);
                } else {
                    log::warn!("GoToStep target '{}' not found, finishing quiz", step_id);
                    self.state = PlaybackState::Finished;
                }
                Ok(InteractionOutcome::default())
            }
        }
    }

    fn resolve_option_target(&mut self, next_step_id: Option<&str>) -> AppResult<InteractionOutcome> {
        match next_step_id {
            Some(step_id) if self.quiz.find_step(step_id).is_some() => {
                self.transition_to(step_id.to_string());
            }
            Some(step_id) => {
                log::warn!("Option target '{}' not found, finishing quiz", step_id);
                self.state = PlaybackState::Finished;
            }
            None => self.state = PlaybackState::Finished,
        }
        Ok(InteractionOutcome::default())
    }

    /// Step following the current one in quiz order, or `Finished` at the end.
    fn advance_from(&mut self, current_id: &str) {
        let next = self
            .quiz
            .step_index(current_id)
            .and_then(|index| self.quiz.steps.get(index + 1))
            .map(|step| step.id.clone());

        match next {
            Some(step_id) => self.transition_to(step_id),
            None => self.state = PlaybackState::Finished,
        }
    }

    /// Forward transition; pushes onto the history unless the destination is
    /// already on top (no duplicate consecutive entries).
    fn transition_to(&mut self, step_id: String) {
        if self.history.last() != Some(&step_id) {
            self.history.push(step_id.clone());
        }
        self.state = PlaybackState::OnStep(step_id);
    }

    /// Pops the history and lands on the new top; a no-op with a single
    /// entry (cannot go back past the first step) or after finishing.
    pub fn back(&mut self) {
        if self.is_finished() || self.history.len() <= 1 {
            return;
        }
        self.history.pop();
        if let Some(top) = self.history.last() {
            self.state = PlaybackState::OnStep(top.clone());
        }
    }

    /// Resets to the first step with a fresh history.
    pub fn restart(&mut self) {
        if let Some(first) = self.quiz.steps.first() {
            self.state = PlaybackState::OnStep(first.id.clone());
            self.history = vec![first.id.clone()];
        }
    }
}
