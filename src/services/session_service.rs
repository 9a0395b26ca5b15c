use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::dto::{
        request::SessionMode,
        response::{QuizResultsResponse, SessionView},
    },
    repositories::{QuizRepository, StatsRepository},
    services::navigation::QuizSession,
};

struct ActiveSession {
    mode: SessionMode,
    session: QuizSession,
}

/// In-memory registry of running playback sessions. Preview sessions just
/// play; share sessions additionally feed the response counters.
pub struct SessionService {
    quiz_repository: Arc<dyn QuizRepository>,
    stats_repository: Arc<dyn StatsRepository>,
    sessions: RwLock<HashMap<String, ActiveSession>>,
}

impl SessionService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        stats_repository: Arc<dyn StatsRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            stats_repository,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn start(&self, quiz_id: &str, mode: SessionMode) -> AppResult<SessionView> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let session = QuizSession::start(quiz)?;
        let session_id = Uuid::new_v4().to_string();
        let view = Self::view_of(&session_id, &session, None);

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id, ActiveSession { mode, session });

        Ok(view)
    }

    pub async fn view(&self, session_id: &str) -> AppResult<SessionView> {
        let sessions = self.sessions.read().await;
        let active = Self::active(&sessions, session_id)?;
        Ok(Self::view_of(session_id, &active.session, None))
    }

    pub async fn interact(
        &self,
        session_id: &str,
        component_id: &str,
        option_id: Option<&str>,
    ) -> AppResult<SessionView> {
        let (view, recorded) = {
            let mut sessions = self.sessions.write().await;
            let active = sessions.get_mut(session_id).ok_or_else(|| {
                AppError::NotFound(format!("Session with id '{}' not found", session_id))
            })?;

            let outcome = active.session.interact(component_id, option_id)?;
            let recorded = match (active.mode, outcome.picked_option_id) {
                (SessionMode::Share, Some(option_id)) => {
                    Some((active.session.quiz().id.clone(), option_id))
                }
                _ => None,
            };
            (
                Self::view_of(session_id, &active.session, outcome.external_url),
                recorded,
            )
        };

        if let Some((quiz_id, option_id)) = recorded {
            self.stats_repository.record(&quiz_id, &option_id).await?;
        }

        Ok(view)
    }

    pub async fn back(&self, session_id: &str) -> AppResult<SessionView> {
        let mut sessions = self.sessions.write().await;
        let active = sessions.get_mut(session_id).ok_or_else(|| {
            AppError::NotFound(format!("Session with id '{}' not found", session_id))
        })?;

        active.session.back();
        Ok(Self::view_of(session_id, &active.session, None))
    }

    pub async fn restart(&self, session_id: &str) -> AppResult<SessionView> {
        let mut sessions = self.sessions.write().await;
        let active = sessions.get_mut(session_id).ok_or_else(|| {
            AppError::NotFound(format!("Session with id '{}' not found", session_id))
        })?;

        active.session.restart();
        Ok(Self::view_of(session_id, &active.session, None))
    }

    /// Aggregated response counters for the results page.
    pub async fn results(&self, quiz_id: &str) -> AppResult<QuizResultsResponse> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let counts = self.stats_repository.load(quiz_id).await;
        let total_responses = counts.values().sum();

        Ok(QuizResultsResponse {
            quiz_id: quiz.id,
            title: quiz.title,
            counts,
            total_responses,
        })
    }

    fn active<'a>(
        sessions: &'a HashMap<String, ActiveSession>,
        session_id: &str,
    ) -> AppResult<&'a ActiveSession> {
        sessions.get(session_id).ok_or_else(|| {
            AppError::NotFound(format!("Session with id '{}' not found", session_id))
        })
    }

    fn view_of(session_id: &str, session: &QuizSession, external_url: Option<String>) -> SessionView {
        SessionView {
            session_id: session_id.to_string(),
            quiz_id: session.quiz().id.clone(),
            quiz_title: session.quiz().title.clone(),
            finished: session.is_finished(),
            current_step: session.current_step().cloned(),
            progress: session.progress(),
            can_go_back: session.can_go_back(),
            external_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{ComponentKind, Quiz};
    use crate::repositories::{MockQuizRepository, MockStatsRepository, StoreStatsRepository};
    use crate::services::mutations;
    use crate::storage::MemoryStore;

    fn playable_quiz() -> (Quiz, String) {
        let quiz = Quiz::new(Some("Jogável".to_string()));
        let step = quiz.steps[0].id.clone();
        let (quiz, button_id) =
            mutations::add_component(&quiz, &step, ComponentKind::Button).unwrap();
        (quiz, button_id)
    }

    fn service_for(quiz: Quiz, stats: Arc<dyn StatsRepository>) -> SessionService {
        let mut repository = MockQuizRepository::new();
        let stored = quiz.clone();
        repository
            .expect_find_by_id()
            .returning(move |id| Ok((id == stored.id).then(|| stored.clone())));
        SessionService::new(Arc::new(repository), stats)
    }

    #[actix_web::test]
    async fn start_creates_a_session_on_the_first_step() {
        let (quiz, _) = playable_quiz();
        let quiz_id = quiz.id.clone();
        let first_step = quiz.steps[0].id.clone();
        let service = service_for(quiz, Arc::new(MockStatsRepository::new()));

        let view = service
            .start(&quiz_id, SessionMode::Preview)
            .await
            .unwrap();

        assert!(!view.finished);
        assert_eq!(view.current_step.unwrap().id, first_step);
        assert!(!view.can_go_back);
    }

    #[actix_web::test]
    async fn preview_interactions_do_not_record_stats() {
        let quiz = Quiz::new(None);
        let step = quiz.steps[0].id.clone();
        let (quiz, options_id) =
            mutations::add_component(&quiz, &step, ComponentKind::Options).unwrap();
        let option = match &quiz.steps[0].components[0] {
            crate::models::domain::Component::Options(o) => o.options[0].id.clone(),
            _ => unreachable!(),
        };
        let quiz_id = quiz.id.clone();

        // the mock would panic on an unexpected record() call
        let stats = MockStatsRepository::new();
        let service = service_for(quiz, Arc::new(stats));

        let view = service.start(&quiz_id, SessionMode::Preview).await.unwrap();
        let view = service
            .interact(&view.session_id, &options_id, Some(&option))
            .await
            .unwrap();

        // default options are unlinked, so the pick ends the quiz
        assert!(view.finished);
    }

    #[actix_web::test]
    async fn share_interactions_record_option_picks() {
        let quiz = Quiz::new(None);
        let step = quiz.steps[0].id.clone();
        let (quiz, options_id) =
            mutations::add_component(&quiz, &step, ComponentKind::Options).unwrap();
        let option = match &quiz.steps[0].components[0] {
            crate::models::domain::Component::Options(o) => o.options[0].id.clone(),
            _ => unreachable!(),
        };
        let quiz_id = quiz.id.clone();

        let stats = Arc::new(StoreStatsRepository::new(Arc::new(MemoryStore::new())));
        let service = service_for(quiz, stats.clone());

        let view = service.start(&quiz_id, SessionMode::Share).await.unwrap();
        service
            .interact(&view.session_id, &options_id, Some(&option))
            .await
            .unwrap();

        let counts = stats.load(&quiz_id).await;
        assert_eq!(counts.get(&option), Some(&1));
    }

    #[actix_web::test]
    async fn unknown_session_is_not_found() {
        let (quiz, _) = playable_quiz();
        let service = service_for(quiz, Arc::new(MockStatsRepository::new()));

        assert!(matches!(
            service.view("missing").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn results_aggregate_counts() {
        let (quiz, _) = playable_quiz();
        let quiz_id = quiz.id.clone();

        let stats = Arc::new(StoreStatsRepository::new(Arc::new(MemoryStore::new())));
        stats.record(&quiz_id, "opt-a").await.unwrap();
        stats.record(&quiz_id, "opt-a").await.unwrap();
        stats.record(&quiz_id, "opt-b").await.unwrap();

        let service = service_for(quiz, stats);
        let results = service.results(&quiz_id).await.unwrap();

        assert_eq!(results.total_responses, 3);
        assert_eq!(results.counts.get("opt-a"), Some(&2));
        assert_eq!(results.title, "Jogável");
    }

    #[actix_web::test]
    async fn restart_returns_to_the_first_step() {
        let (quiz, button_id) = playable_quiz();
        let quiz_id = quiz.id.clone();
        let service = service_for(quiz, Arc::new(MockStatsRepository::new()));

        let view = service.start(&quiz_id, SessionMode::Preview).await.unwrap();
        let view = service
            .interact(&view.session_id, &button_id, None)
            .await
            .unwrap();
        assert!(view.finished); // single step, NextStep falls off the end

        let view = service.restart(&view.session_id).await.unwrap();
        assert!(!view.finished);
        assert_eq!(view.progress, 1.0); // one step of one visited
    }
}
