//! Runtime configuration read from the environment (and `.env`, if present).

use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::error::ConfigError;

pub const DEFAULT_DATASET_URL: &str = "https://data.gov.ua/dataset/59ecf2ab-47a1-4fae-a63c-fe5007d68130/resource/9694e34c-92a5-4839-91df-c32850db7ba9/download/mvswantedperson_1.json";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SESSION_QUEUE: usize = 32;

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
});

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_url: String,
    pub fetch_timeout: Duration,
    pub session_queue: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            session_queue: DEFAULT_SESSION_QUEUE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(url) = lookup("WANTED_DATASET_URL") {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::Empty {
                    key: "WANTED_DATASET_URL",
                });
            }
            cfg.dataset_url = url.to_string();
        }

        if let Some(secs) = lookup("WANTED_FETCH_TIMEOUT_SECS") {
            let secs = parse_positive("WANTED_FETCH_TIMEOUT_SECS", &secs)?;
            cfg.fetch_timeout = Duration::from_secs(secs as u64);
        }

        if let Some(cap) = lookup("WANTED_SESSION_QUEUE") {
            cfg.session_queue = parse_positive("WANTED_SESSION_QUEUE", &cap)?;
        }

        Ok(cfg)
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
        }),
    }
}
