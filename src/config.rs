//! Configuration loaded from environment variables (a `.env` file is honoured).

use std::env;
use std::path::PathBuf;

use tracing::warn;
use url::Url;

pub const DEFAULT_DB_PATH: &str = ".data/santa.db";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173/";
pub const DEFAULT_MODEL: &str = "llama3.2:3b";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub db_path: PathBuf,
    /// Where reveal and group links point
    pub base_url: Url,
    /// Ollama-compatible host used to draft message templates. `None` means
    /// the static template is always used.
    pub ollama_host: Option<String>,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("SANTA_DB_PATH")
            .unwrap_or_else(|_| DEFAULT_DB_PATH.to_string())
            .into();

        let base_url = env::var("SANTA_BASE_URL")
            .ok()
            .and_then(|raw| match Url::parse(&raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("Invalid SANTA_BASE_URL '{}': {}, using default", raw, e);
                    None
                }
            })
            .unwrap_or_else(default_base_url);

        let ollama_host = env::var("OLLAMA_HOST")
            .ok()
            .map(|h| h.trim().trim_end_matches('/').to_string())
            .filter(|h| !h.is_empty());

        let model = env::var("SANTA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            db_path,
            base_url,
            ollama_host,
            model,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.into(),
            base_url: default_base_url(),
            ollama_host: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Read on its own so logging can be set up before the rest of the config
/// (whose warnings would otherwise go nowhere).
pub fn log_level_from_env() -> String {
    dotenvy::dotenv().ok();
    level_or_default(env::var("SANTA_LOG_LEVEL").ok())
}

fn level_or_default(raw: Option<String>) -> String {
    raw.map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}
