pub mod component;
pub mod quiz;
pub mod step;

pub use component::{
    Alignment, BorderConfig, BoxSpacing, ButtonAction, ButtonComponent, ColorConfig, Component,
    ComponentKind, ComponentSize, GenericComponent, ImageComponent, OptionItem, OptionsComponent,
    TextComponent, TextTag,
};
pub use quiz::{Quiz, QuizSettings};
pub use step::Step;
