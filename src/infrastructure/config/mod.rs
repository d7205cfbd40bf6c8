use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::domain::history::DEFAULT_RETENTION_DAYS;
use crate::infrastructure::repositories::google_tts_repository::GOOGLE_TTS_ENDPOINT;

/// Upper bounds keeping retention and sweep arithmetic in range
pub const MAX_HISTORY_RETENTION_DAYS: i64 = 36_500;
pub const MAX_HISTORY_SWEEP_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Audio history
    pub history_dir: PathBuf,
    pub history_retention_days: i64,
    pub history_sweep_interval_secs: u64,
    pub templates_dir: PathBuf,
    // Google Text-to-Speech
    pub google_tts_endpoint: String,
    pub google_api_key: Option<String>,
    pub google_credentials_path: PathBuf,
    pub tts_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = Config {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "5000").parse()?,
            environment: match var("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            history_dir: PathBuf::from(var("HISTORY_DIR", "audio_history")),
            history_retention_days: var("HISTORY_RETENTION_DAYS", &DEFAULT_RETENTION_DAYS.to_string())
                .parse()?,
            history_sweep_interval_secs: var("HISTORY_SWEEP_INTERVAL_SECS", "3600").parse()?,
            templates_dir: PathBuf::from(var("TEMPLATES_DIR", "templates")),
            google_tts_endpoint: var("GOOGLE_TTS_ENDPOINT", GOOGLE_TTS_ENDPOINT),
            google_api_key: lookup("GOOGLE_API_KEY").filter(|key| !key.trim().is_empty()),
            google_credentials_path: PathBuf::from(var(
                "GOOGLE_APPLICATION_CREDENTIALS",
                "credentials.json",
            )),
            tts_timeout_secs: var("TTS_TIMEOUT_SECS", "60").parse()?,
        };

        if !(1..=MAX_HISTORY_RETENTION_DAYS).contains(&config.history_retention_days) {
            return Err(format!(
                "HISTORY_RETENTION_DAYS must be between 1 and {}",
                MAX_HISTORY_RETENTION_DAYS
            )
            .into());
        }
        if !(1..=MAX_HISTORY_SWEEP_INTERVAL_SECS).contains(&config.history_sweep_interval_secs) {
            return Err(format!(
                "HISTORY_SWEEP_INTERVAL_SECS must be between 1 and {}",
                MAX_HISTORY_SWEEP_INTERVAL_SECS
            )
            .into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Age after which history entries are swept
    pub fn history_retention(&self) -> Result<chrono::Duration, Box<dyn std::error::Error>> {
        chrono::Duration::try_days(self.history_retention_days)
            .ok_or_else(|| "HISTORY_RETENTION_DAYS is out of range".into())
    }

    pub fn index_page(&self) -> PathBuf {
        self.templates_dir.join("index.html")
    }
}
