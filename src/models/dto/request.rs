use serde::Deserialize;
use validator::Validate;

use crate::models::domain::component::{
    Alignment, BorderConfig, BoxSpacing, ButtonAction, ColorConfig, ComponentKind, ComponentSize,
    OptionItem, TextTag,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTitleRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}

/// Shallow-merge patch for the quiz-wide settings panel.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, max = 50))]
    pub background_color: Option<String>,
    pub show_branding: Option<bool>,
    #[validate(length(min = 1, max = 100))]
    pub font_family: Option<String>,
}

/// Shallow-merge patch for a single step.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StepPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub title: Option<String>,
    pub show_logo: Option<bool>,
    pub show_progress: Option<bool>,
    pub allow_return: Option<bool>,
    pub background_image: Option<String>,
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddComponentRequest {
    pub kind: ComponentKind,
    pub selected_step_id: Option<String>,
    pub selected_component_id: Option<String>,
}

/// Variant-specific shallow-merge patch for a component. The `type` tag must
/// match the targeted component's variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentPatch {
    Button(ButtonPatch),
    Text(TextPatch),
    Image(ImagePatch),
    Options(OptionsPatch),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonPatch {
    pub text: Option<String>,
    pub action: Option<ButtonAction>,
    pub size: Option<ComponentSize>,
    pub alignment: Option<Alignment>,
    pub color: Option<ColorConfig>,
    pub border: Option<BorderConfig>,
    pub padding: Option<BoxSpacing>,
    pub margin: Option<BoxSpacing>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPatch {
    pub content: Option<String>,
    pub html_tag: Option<TextTag>,
    pub size: Option<ComponentSize>,
    pub color: Option<String>,
    pub alignment: Option<Alignment>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePatch {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub size: Option<ComponentSize>,
    pub custom_width: Option<u32>,
    pub custom_height: Option<u32>,
    pub border: Option<BorderConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPatch {
    pub text: Option<String>,
    pub options: Option<Vec<OptionItem>>,
    pub size: Option<ComponentSize>,
    pub color: Option<ColorConfig>,
    pub border: Option<BorderConfig>,
}

/// Drag-reorder result from the canvas: move the component at `from_index`
/// to `to_index`, shifting the elements in between.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderComponentsRequest {
    pub from_index: usize,
    pub to_index: usize,
}

/// Where the editor's selection currently sits, sent along with structural
/// mutations so the server can report where it should land afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSelection {
    pub selected_step_id: Option<String>,
    pub selected_component_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizSortKey {
    Updated,
    Created,
    Title,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListQuizzesQuery {
    /// Case-insensitive title substring filter.
    pub search: Option<String>,
    pub sort: Option<QuizSortKey>,
    #[serde(default)]
    pub favorites: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Author playback from the editor; no stats recorded.
    Preview,
    /// Public play-through that increments the response counters.
    Share,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub quiz_id: String,
    pub mode: SessionMode,
}

/// A button press or option pick on the current step.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRequest {
    pub component_id: String,
    pub option_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn component_patch_is_tagged_by_type() {
        let json = r#"{"type":"Button","text":"Avançar","action":{"type":"nextStep"}}"#;
        let patch: ComponentPatch = serde_json::from_str(json).unwrap();

        match patch {
            ComponentPatch::Button(button) => {
                assert_eq!(button.text.as_deref(), Some("Avançar"));
                assert_eq!(button.action, Some(ButtonAction::NextStep));
                assert!(button.color.is_none());
            }
            other => panic!("expected Button patch, got {:?}", other),
        }
    }

    #[test]
    fn create_quiz_request_rejects_empty_title() {
        let request = CreateQuizRequest {
            title: Some(String::new()),
        };
        assert!(request.validate().is_err());

        let request = CreateQuizRequest { title: None };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn list_query_defaults_favorites_to_false() {
        let query: ListQuizzesQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.favorites);
        assert!(query.search.is_none());
        assert!(query.sort.is_none());
    }

    #[test]
    fn session_mode_parses_lowercase() {
        let mode: SessionMode = serde_json::from_str("\"share\"").unwrap();
        assert_eq!(mode, SessionMode::Share);
    }
}
