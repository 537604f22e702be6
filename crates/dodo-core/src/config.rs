use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Url;

use crate::{errors::Error, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Typed process configuration.
///
/// Built once at startup and handed to the gateway services; nothing below
/// this layer reads the environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the statistics API.
    pub api_url: Url,
    /// Base URL of the auth/settings service.
    pub database_api_url: Url,
    /// Bound on every remote exchange.
    pub request_timeout: Duration,
    /// Snapshot read by `settings::JsonFileSettingsStore`.
    pub settings_file: PathBuf,
}

impl Config {
    /// Load from `.env` (if present) and the process environment.
    pub fn load() -> Result<Self> {
        Self::load_with_dotenv(Path::new(".env"))
    }

    /// Existing variables win over the file.
    fn load_with_dotenv(dotenv: &Path) -> Result<Self> {
        if dotenv.exists() {
            dotenvy::from_path(dotenv).map_err(|e| {
                Error::Config(format!("cannot load {}: {e}", dotenv.display()))
            })?;
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, a map in tests, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = required_url(&lookup, "DODO_API_URL")?;
        let database_api_url = required_url(&lookup, "DATABASE_API_URL")?;

        let timeout_secs = match lookup("DODO_API_TIMEOUT_SECS").and_then(present) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                Error::Config(format!("DODO_API_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(Error::Config(
                "DODO_API_TIMEOUT_SECS must be positive".to_string(),
            ));
        }

        let settings_file = lookup("SETTINGS_FILE")
            .and_then(present)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("settings.json"));

        Ok(Self {
            api_url,
            database_api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            settings_file,
        })
    }
}

fn required_url(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Url> {
    let raw = lookup(key)
        .and_then(present)
        .ok_or_else(|| Error::Config(format!("{key} environment variable is required")))?;
    Url::parse(&raw).map_err(|e| Error::Config(format!("{key} is not a valid url: {e}")))
}

fn present(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
