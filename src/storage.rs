use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::{config::Config, errors::AppResult};

/// Synchronous string-keyed blob store, the moral equivalent of the browser
/// `localStorage` the editor originally persisted to. Read-modify-write with
/// no locking between callers; last write wins for the whole value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Stores each key as `<data_dir>/<key>.json`.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(config: &Config) -> AppResult<Self> {
        fs::create_dir_all(&config.data_dir)?;
        log::info!("Using data directory {}", config.data_dir.display());
        Ok(Self {
            data_dir: config.data_dir.clone(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store used by tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("quizzes", "[]").unwrap();
        assert_eq!(store.get("quizzes").unwrap().as_deref(), Some("[]"));

        store.set("quizzes", "[1]").unwrap();
        assert_eq!(store.get("quizzes").unwrap().as_deref(), Some("[1]"));

        store.remove("quizzes").unwrap();
        assert_eq!(store.get("quizzes").unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("quizforge-{}", uuid::Uuid::new_v4()));
        let config = Config {
            data_dir: dir.clone(),
            ..Config::test_config()
        };
        let store = FileStore::new(&config).unwrap();

        assert_eq!(store.get("quizzes").unwrap(), None);
        store.set("quizzes", "[{\"id\":\"a\"}]").unwrap();
        assert_eq!(
            store.get("quizzes").unwrap().as_deref(),
            Some("[{\"id\":\"a\"}]")
        );

        store.remove("quizzes").unwrap();
        store.remove("quizzes").unwrap(); // removing twice is fine
        assert_eq!(store.get("quizzes").unwrap(), None);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_store_is_object_safe() {
        fn assert_store<T: KeyValueStore>() {}
        assert_store::<MemoryStore>();
        assert_store::<FileStore>();
    }
}
