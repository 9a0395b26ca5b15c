use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentSize {
    Small,
    Medium,
    Large,
    Custom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// HTML tag a text component renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTag {
    P,
    H1,
    H2,
    H3,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorConfig {
    pub solid: String,
    pub is_gradient: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_direction: Option<String>,
}

impl ColorConfig {
    pub fn solid(color: &str) -> Self {
        Self {
            solid: color.to_string(),
            is_gradient: false,
            gradient_from: None,
            gradient_to: None,
            gradient_direction: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderConfig {
    pub size: u32,
    pub color: String,
    pub radius: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoxSpacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl BoxSpacing {
    pub fn zero() -> Self {
        Self {
            top: 0,
            right: 0,
            bottom: 0,
            left: 0,
        }
    }
}

/// What a button does when pressed during playback.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ButtonAction {
    NextStep,
    /// Ends the quiz immediately.
    Submit,
    ExternalLink {
        url: String,
    },
    #[serde(rename_all = "camelCase")]
    GoToStep {
        step_id: String,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonComponent {
    pub id: String,
    pub text: String,
    pub action: ButtonAction,
    pub size: ComponentSize,
    pub alignment: Alignment,
    pub color: ColorConfig,
    pub border: BorderConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<BoxSpacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<BoxSpacing>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextComponent {
    pub id: String,
    pub content: String,
    pub html_tag: TextTag,
    pub size: ComponentSize,
    pub color: String,
    pub alignment: Alignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageComponent {
    pub id: String,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub size: ComponentSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_height: Option<u32>,
    pub border: BorderConfig,
}

/// One choice inside an Options component. `next_step_id` is a weak reference:
/// it is nulled when the referenced step is removed, and `None` means "end of
/// quiz" during playback.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionItem {
    pub id: String,
    pub text: String,
    pub next_step_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsComponent {
    pub id: String,
    pub text: String,
    pub options: Vec<OptionItem>,
    pub size: ComponentSize,
    pub color: ColorConfig,
    pub border: BorderConfig,
}

/// Placeholder for component kinds the editor does not fully model yet.
/// Survives load/save cycles untouched.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GenericComponent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A renderable element within a step, discriminated by the `type` field in
/// the persisted JSON.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum Component {
    Button(ButtonComponent),
    Text(TextComponent),
    Image(ImageComponent),
    Options(OptionsComponent),
    #[serde(untagged)]
    Generic(GenericComponent),
}

/// The component kinds the editor palette can create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum ComponentKind {
    Button,
    Text,
    Image,
    Options,
}

impl Component {
    pub fn id(&self) -> &str {
        match self {
            Component::Button(c) => &c.id,
            Component::Text(c) => &c.id,
            Component::Image(c) => &c.id,
            Component::Options(c) => &c.id,
            Component::Generic(c) => &c.id,
        }
    }

    /// Builds a fully-defaulted component of the requested kind, styled the
    /// way the editor palette creates them.
    pub fn new_default(kind: ComponentKind) -> Self {
        let id = Uuid::new_v4().to_string();
        match kind {
            ComponentKind::Button => Component::Button(ButtonComponent {
                id,
                text: "Botão".to_string(),
                action: ButtonAction::NextStep,
                size: ComponentSize::Medium,
                alignment: Alignment::Center,
                color: ColorConfig {
                    solid: "#10b981".to_string(),
                    is_gradient: false,
                    gradient_from: Some("#10b981".to_string()),
                    gradient_to: Some("#3b82f6".to_string()),
                    gradient_direction: Some("to right".to_string()),
                },
                border: BorderConfig {
                    size: 0,
                    color: "#FFFFFF".to_string(),
                    radius: 8,
                },
                padding: Some(BoxSpacing {
                    top: 10,
                    right: 20,
                    bottom: 10,
                    left: 20,
                }),
                margin: Some(BoxSpacing::zero()),
            }),
            ComponentKind::Text => Component::Text(TextComponent {
                id,
                content: "Seu texto aqui".to_string(),
                html_tag: TextTag::P,
                size: ComponentSize::Medium,
                color: "#000000".to_string(),
                alignment: Alignment::Left,
                font_family: Some("Roboto".to_string()),
                font_weight: Some("400".to_string()),
            }),
            ComponentKind::Image => Component::Image(ImageComponent {
                id,
                src: String::new(),
                alt: Some("Imagem".to_string()),
                size: ComponentSize::Medium,
                custom_width: None,
                custom_height: None,
                border: BorderConfig {
                    size: 0,
                    color: "transparent".to_string(),
                    radius: 8,
                },
            }),
            ComponentKind::Options => Component::Options(OptionsComponent {
                id,
                text: "Qual sua escolha?".to_string(),
                options: vec![
                    OptionItem {
                        id: Uuid::new_v4().to_string(),
                        text: "Opção 1".to_string(),
                        next_step_id: None,
                    },
                    OptionItem {
                        id: Uuid::new_v4().to_string(),
                        text: "Opção 2".to_string(),
                        next_step_id: None,
                    },
                ],
                size: ComponentSize::Medium,
                color: ColorConfig::solid("#f3f4f6"),
                border: BorderConfig {
                    size: 1,
                    color: "#e5e7eb".to_string(),
                    radius: 8,
                },
            }),
        }
    }
}
