use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::{
            request::{ListQuizzesQuery, QuizSortKey, UpdateSettingsRequest},
            response::QuizSummary,
        },
    },
    repositories::QuizRepository,
    services::mutations,
};

/// Collection-level operations behind the listing and editor header.
pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn create_quiz(&self, title: Option<String>) -> AppResult<Quiz> {
        let quiz = Quiz::new(title);
        log::info!("Creating quiz {}", quiz.id);
        self.repository.upsert(quiz).await
    }

    pub async fn list_quizzes(&self, query: &ListQuizzesQuery) -> Vec<QuizSummary> {
        let mut quizzes = self.repository.load_all().await;

        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            quizzes.retain(|q| q.title.to_lowercase().contains(&needle));
        }
        if query.favorites {
            quizzes.retain(|q| q.favorite);
        }

        match query.sort.unwrap_or(QuizSortKey::Updated) {
            QuizSortKey::Updated => quizzes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            QuizSortKey::Created => quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            QuizSortKey::Title => quizzes.sort_by_key(|q| q.title.to_lowercase()),
        }

        quizzes.iter().map(QuizSummary::from).collect()
    }

    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }
        log::info!("Deleted quiz {}", id);
        Ok(())
    }

    pub async fn duplicate_quiz(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self.get_quiz(id).await?;
        let copy = mutations::duplicate_quiz(&quiz);
        self.repository.upsert(copy).await
    }

    pub async fn toggle_favorite(&self, id: &str) -> AppResult<Quiz> {
        let mut quiz = self.get_quiz(id).await?;
        quiz.favorite = !quiz.favorite;
        self.repository.upsert(quiz).await
    }

    pub async fn update_title(&self, id: &str, title: &str) -> AppResult<Quiz> {
        let mut quiz = self.get_quiz(id).await?;
        quiz.title = title.to_string();
        self.repository.upsert(quiz).await
    }

    pub async fn update_settings(
        &self,
        id: &str,
        patch: &UpdateSettingsRequest,
    ) -> AppResult<Quiz> {
        let quiz = self.get_quiz(id).await?;
        let next = mutations::update_settings(&quiz, patch);
        self.repository.upsert(next).await
    }
}
