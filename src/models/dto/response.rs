use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Quiz, Step};

/// Listing card data; the full document is only shipped to the editor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub step_count: usize,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            step_count: quiz.steps.len(),
            favorite: quiz.favorite,
            created_at: quiz.created_at,
            updated_at: quiz.updated_at,
        }
    }
}

/// Editor mutation result: the updated document plus where the selection
/// should land.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorResponse {
    pub quiz: Quiz,
    pub selected_step_id: Option<String>,
    pub selected_component_id: Option<String>,
}

/// Snapshot of a playback session after an interaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<Step>,
    /// Fraction of steps visited, capped at 1.0.
    pub progress: f64,
    pub can_go_back: bool,
    /// Set when the interaction hit an external-link button; the caller is
    /// responsible for opening it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultsResponse {
    pub quiz_id: String,
    pub title: String,
    /// Flat `option_id -> count` map.
    pub counts: HashMap<String, u64>,
    pub total_responses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reflects_quiz_fields() {
        let quiz = Quiz::new(Some("Onboarding".to_string()));
        let summary = QuizSummary::from(&quiz);

        assert_eq!(summary.id, quiz.id);
        assert_eq!(summary.title, "Onboarding");
        assert_eq!(summary.step_count, 1);
        assert!(!summary.favorite);
    }

    #[test]
    fn session_view_omits_step_when_finished() {
        let view = SessionView {
            session_id: "s".into(),
            quiz_id: "q".into(),
            quiz_title: "t".into(),
            finished: true,
            current_step: None,
            progress: 1.0,
            can_go_back: false,
            external_url: None,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("currentStep").is_none());
        assert!(json.get("externalUrl").is_none());
        assert_eq!(json["finished"], true);
    }
}
