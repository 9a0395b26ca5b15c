pub mod editor_service;
pub mod mutations;
pub mod navigation;
pub mod quiz_service;
pub mod session_service;

pub use editor_service::{EditorService, Selection};
pub use quiz_service::QuizService;
pub use session_service::SessionService;
