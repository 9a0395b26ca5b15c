use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{config::Config, errors::AppResult, storage::KeyValueStore};

/// Per-quiz response counters: a flat `option_id -> count` map stored under
/// its own key so playback never rewrites the quiz collection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Missing or malformed payload reads as an empty map.
    async fn load(&self, quiz_id: &str) -> HashMap<String, u64>;
    async fn record(&self, quiz_id: &str, option_id: &str) -> AppResult<()>;
    async fn clear(&self, quiz_id: &str) -> AppResult<()>;
}

pub struct StoreStatsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl StoreStatsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read_counts(&self, quiz_id: &str) -> HashMap<String, u64> {
        let key = Config::stats_key(quiz_id);
        match self.store.get(&key) {
            Ok(Some(payload)) => serde_json::from_str(&payload).unwrap_or_else(|err| {
                log::warn!("Malformed stats payload for quiz {}: {}", quiz_id, err);
                HashMap::new()
            }),
            Ok(None) => HashMap::new(),
            Err(err) => {
                log::warn!("Failed to read stats for quiz {}: {}", quiz_id, err);
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl StatsRepository for StoreStatsRepository {
    async fn load(&self, quiz_id: &str) -> HashMap<String, u64> {
        self.read_counts(quiz_id)
    }

    async fn record(&self, quiz_id: &str, option_id: &str) -> AppResult<()> {
        let mut counts = self.read_counts(quiz_id);
        *counts.entry(option_id.to_string()).or_insert(0) += 1;

        let payload = serde_json::to_string(&counts)?;
        self.store.set(&Config::stats_key(quiz_id), &payload)
    }

    async fn clear(&self, quiz_id: &str) -> AppResult<()> {
        self.store.remove(&Config::stats_key(quiz_id))
    }
}
