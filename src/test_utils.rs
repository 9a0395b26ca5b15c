use crate::models::domain::{Component, ComponentKind, Quiz};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a fresh quiz with a single default step
    pub fn test_quiz() -> Quiz {
        Quiz::new(Some("Pesquisa de Teste".to_string()))
    }

    /// Creates a quiz with `title` and a single default step
    pub fn test_quiz_with_title(title: &str) -> Quiz {
        Quiz::new(Some(title.to_string()))
    }

    /// Creates a two-step quiz with a NextStep button on the first step,
    /// the shortest shape that actually navigates somewhere.
    pub fn two_step_quiz() -> Quiz {
        let mut quiz = Quiz::new(Some("Pesquisa de Teste".to_string()));
        let mut second = crate::models::domain::Step::at_position(2);
        second.id = "step-2".to_string();
        quiz.steps.push(second);
        quiz.steps[0]
            .components
            .push(Component::new_default(ComponentKind::Button));
        quiz
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::{dev::ServiceResponse, web};

    use crate::{app_state::AppState, config::Config, storage::MemoryStore};

    /// Builds an in-memory application state for handler tests.
    pub fn make_state() -> web::Data<AppState> {
        let state = AppState::with_store(Config::test_config(), Arc::new(MemoryStore::new()));
        web::Data::new(state)
    }

    /// Reads a response body as JSON
    pub async fn read_json(resp: ServiceResponse) -> serde_json::Value {
        actix_web::test::read_body_json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_quiz() {
        let quiz = test_quiz();
        assert_eq!(quiz.title, "Pesquisa de Teste");
        assert_eq!(quiz.steps.len(), 1);
    }

    #[test]
    fn test_fixtures_two_step_quiz() {
        let quiz = two_step_quiz();
        assert_eq!(quiz.steps.len(), 2);
        assert_eq!(quiz.steps[1].id, "step-2");
        assert_eq!(quiz.steps[0].components.len(), 1);
    }
}
