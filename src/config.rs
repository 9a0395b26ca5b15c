use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub quizzes_key: String,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("QUIZFORGE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            quizzes_key: env::var("QUIZFORGE_QUIZZES_KEY")
                .unwrap_or_else(|_| "quizzes".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Storage key for the per-quiz response counter map.
    pub fn stats_key(quiz_id: &str) -> String {
        format!("quiz_stats_{}", quiz_id)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            data_dir: std::env::temp_dir().join("quizforge-test"),
            quizzes_key: "quizzes".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
