use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{
    BorderConfig, ColorConfig, Component, ComponentSize, OptionItem, OptionsComponent, Quiz,
    QuizSettings, Step,
};

/// Lenient on-disk shape covering every document version ever written:
/// early documents lack `settings`, may lack `steps`, and may carry the
/// pre-step `questions` array. Migration happens once at load; nothing
/// downstream ever sees this type.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQuiz {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub steps: Option<Vec<Step>>,
    #[serde(default)]
    pub settings: Option<QuizSettings>,
    #[serde(default)]
    pub favorite: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub questions: Option<Vec<LegacyQuestion>>,
}

/// Pre-step schema: a flat question list where each option links directly to
/// the next question.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyQuestion {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub options: Vec<LegacyOption>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub next_question_id: Option<String>,
}

/// One-way forward migration. Synthesizes defaults for missing fields and
/// rewrites legacy questions as steps; idempotent once `settings` and `steps`
/// are present because the legacy branch only fires when `steps` is absent.
pub fn migrate(stored: StoredQuiz) -> Quiz {
    let now = Utc::now();

    let steps = match stored.steps {
        Some(steps) => steps,
        None => stored
            .questions
            .map(steps_from_legacy_questions)
            .unwrap_or_default(),
    };

    Quiz {
        id: stored.id,
        title: stored
            .title
            .unwrap_or_else(|| "Quiz Carregado Sem Título".to_string()),
        steps,
        settings: stored.settings.unwrap_or_default(),
        favorite: stored.favorite.unwrap_or(false),
        created_at: stored.created_at.unwrap_or(now),
        updated_at: stored.updated_at.unwrap_or(now),
    }
}

/// Each legacy question becomes a step holding a single Options component.
/// Question ids become the step ids so `nextQuestionId` links keep resolving.
fn steps_from_legacy_questions(questions: Vec<LegacyQuestion>) -> Vec<Step> {
    questions
        .into_iter()
        .enumerate()
        .map(|(index, question)| Step {
            id: question.id,
            name: Step::name_for(index + 1),
            title: question.text.clone(),
            components: vec![Component::Options(OptionsComponent {
                id: Uuid::new_v4().to_string(),
                text: question.text,
                options: question
                    .options
                    .into_iter()
                    .map(|option| OptionItem {
                        id: option.id,
                        text: option.text,
                        next_step_id: option.next_question_id,
                    })
                    .collect(),
                size: ComponentSize::Medium,
                color: ColorConfig::solid("#f3f4f6"),
                border: BorderConfig {
                    size: 1,
                    color: "#e5e7eb".to_string(),
                    radius: 8,
                },
            })],
            show_logo: true,
            show_progress: true,
            allow_return: true,
            background_image: None,
            background_color: None,
        })
        .collect()
}
