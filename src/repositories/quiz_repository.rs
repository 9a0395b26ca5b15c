use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    errors::AppResult,
    models::domain::Quiz,
    repositories::migration::{migrate, StoredQuiz},
    storage::KeyValueStore,
};

/// Persistence for the quiz collection. The whole collection lives under a
/// single storage key and every write overwrites it (last write wins, as the
/// original single-user tool behaves).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Reads and migrates the stored collection. An absent or unparsable
    /// payload yields an empty collection, never an error.
    async fn load_all(&self) -> Vec<Quiz>;
    async fn save_all(&self, quizzes: Vec<Quiz>) -> AppResult<()>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    /// Replace-or-append by id; refreshes `updated_at`.
    async fn upsert(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// Returns whether a quiz with that id existed.
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

pub struct StoreQuizRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl StoreQuizRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    fn read_collection(&self) -> Vec<Quiz> {
        let payload = match self.store.get(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Failed to read quiz collection: {}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<StoredQuiz>>(&payload) {
            Ok(stored) => stored.into_iter().map(migrate).collect(),
            Err(err) => {
                log::warn!("Malformed quiz collection payload, treating as empty: {}", err);
                Vec::new()
            }
        }
    }

    fn write_collection(&self, quizzes: &[Quiz]) -> AppResult<()> {
        let payload = serde_json::to_string(quizzes)?;
        self.store.set(&self.key, &payload)
    }
}

#[async_trait]
impl QuizRepository for StoreQuizRepository {
    async fn load_all(&self) -> Vec<Quiz> {
        self.read_collection()
    }

    async fn save_all(&self, quizzes: Vec<Quiz>) -> AppResult<()> {
        self.write_collection(&quizzes)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.read_collection().into_iter().find(|q| q.id == id))
    }

    async fn upsert(&self, mut quiz: Quiz) -> AppResult<Quiz> {
        quiz.touch();

        let mut quizzes = self.read_collection();
        match quizzes.iter_mut().find(|q| q.id == quiz.id) {
            Some(existing) => *existing = quiz.clone(),
            None => quizzes.push(quiz.clone()),
        }
        self.write_collection(&quizzes)?;

        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let quizzes = self.read_collection();
        let before = quizzes.len();
        let remaining: Vec<Quiz> = quizzes.into_iter().filter(|q| q.id != id).collect();

        let removed = before != remaining.len();
        if removed {
            self.write_collection(&remaining)?;
        }

        Ok(removed)
    }
}
