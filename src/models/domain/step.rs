use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::component::Component;

/// One screen of the quiz, holding an ordered list of components.
///
/// `name` is a machine label regenerated as `"Etapa {n}"` whenever the step's
/// position changes; it is not guaranteed unique if a user overrides it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub name: String,
    pub title: String,
    pub components: Vec<Component>,
    #[serde(default = "default_true")]
    pub show_logo: bool,
    #[serde(default = "default_true")]
    pub show_progress: bool,
    #[serde(default = "default_true")]
    pub allow_return: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Step {
    /// New empty step at 1-based `position` in the quiz.
    pub fn at_position(position: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: Self::name_for(position),
            title: format!("Título da Etapa {}", position),
            components: Vec::new(),
            show_logo: true,
            show_progress: true,
            allow_return: true,
            background_image: None,
            background_color: None,
        }
    }

    pub fn name_for(position: usize) -> String {
        format!("Etapa {}", position)
    }

    pub fn find_component(&self, component_id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == component_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::component::ComponentKind;

    #[test]
    fn new_step_uses_positional_defaults() {
        let step = Step::at_position(3);
        assert_eq!(step.name, "Etapa 3");
        assert_eq!(step.title, "Título da Etapa 3");
        assert!(step.components.is_empty());
        assert!(step.show_logo && step.show_progress && step.allow_return);
    }

    #[test]
    fn display_flags_default_to_true_when_missing_from_json() {
        let json = r#"{"id":"s1","name":"Etapa 1","title":"T","components":[]}"#;
        let step: Step = serde_json::from_str(json).unwrap();
        assert!(step.show_logo);
        assert!(step.show_progress);
        assert!(step.allow_return);
    }

    #[test]
    fn find_component_matches_by_id() {
        let mut step = Step::at_position(1);
        step.components.push(Component::new_default(ComponentKind::Text));
        let id = step.components[0].id().to_string();

        assert!(step.find_component(&id).is_some());
        assert!(step.find_component("nope").is_none());
    }
}
