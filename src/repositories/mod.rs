pub mod migration;
pub mod quiz_repository;
pub mod stats_repository;

pub use quiz_repository::{QuizRepository, StoreQuizRepository};
pub use stats_repository::{StatsRepository, StoreStatsRepository};

#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
