use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::step::Step;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    pub background_color: String,
    pub show_branding: bool,
    pub font_family: String,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFF".to_string(),
            show_branding: true,
            font_family: "Roboto".to_string(),
        }
    }
}

/// A quiz document: ordered steps plus global settings and metadata.
/// Always fully migrated in memory; the lenient pre-migration shape lives in
/// `repositories::migration`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub steps: Vec<Step>,
    pub settings: QuizSettings,
    #[serde(default)]
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// New quiz with the default title and a single empty step, the way the
    /// editor creates one.
    pub fn new(title: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.unwrap_or_else(|| "Quiz sem Título".to_string()),
            steps: vec![Step::at_position(1)],
            settings: QuizSettings::default(),
            favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn find_step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub fn step_index(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == step_id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
