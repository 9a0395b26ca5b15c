use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{StoreQuizRepository, StoreStatsRepository},
    services::{EditorService, QuizService, SessionService},
    storage::{FileStore, KeyValueStore},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub editor_service: Arc<EditorService>,
    pub session_service: Arc<SessionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let store = Arc::new(FileStore::new(&config)?);
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let quiz_repository = Arc::new(StoreQuizRepository::new(
            Arc::clone(&store),
            &config.quizzes_key,
        ));
        let stats_repository = Arc::new(StoreStatsRepository::new(Arc::clone(&store)));

        let quiz_service = Arc::new(QuizService::new(quiz_repository.clone()));
        let editor_service = Arc::new(EditorService::new(quiz_repository.clone()));
        let session_service = Arc::new(SessionService::new(quiz_repository, stats_repository));

        Self {
            quiz_service,
            editor_service,
            session_service,
            config: Arc::new(config),
        }
    }
}
