//! Configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use checkin_core::{EngineConfig, DEFAULT_SHORT_TEXT_MAX_CHARS};
use checkin_store::json_file::DEFAULT_DB_PATH;
use checkin_store::JsonFileStore;
use telegram_client::{ClientConfig, DEFAULT_API_BASE, DEFAULT_POLL_TIMEOUT};

/// Process configuration shared by both binaries.
#[derive(Clone)]
pub struct Config {
    /// Bot API token.
    pub bot_token: String,
    /// Path of the JSON user table.
    pub db_path: PathBuf,
    /// Bot API base URL.
    pub api_base: String,
    /// Long-poll timeout for `getUpdates`.
    pub poll_timeout: Duration,
    /// Conversation engine switches.
    pub engine: EngineConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `BOT_TOKEN` | Bot API token | (required) |
    /// | `CHECKIN_DB_PATH` | JSON user table | `db.json` |
    /// | `TELEGRAM_API_URL` | Bot API base URL | `https://api.telegram.org` |
    /// | `CHECKIN_POLL_TIMEOUT_SECS` | Long-poll timeout | `30` |
    /// | `CHECKIN_GENTLE_SHORT_TEXT` | Gentle menu for short idle text | `true` |
    /// | `CHECKIN_SHORT_TEXT_MAX` | Short text threshold, in characters | `20` |
    /// | `CHECKIN_DAILY_REMINDERS` | Allow `/daily_on` and `/daily_off` | `true` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bot_token = get("BOT_TOKEN").ok_or(ConfigError::MissingToken)?;

        let db_path = get("CHECKIN_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let api_base = get("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let poll_timeout = match get("CHECKIN_POLL_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("CHECKIN_POLL_TIMEOUT_SECS", &raw)?),
            None => DEFAULT_POLL_TIMEOUT,
        };

        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            gentle_short_text: match get("CHECKIN_GENTLE_SHORT_TEXT") {
                Some(raw) => parse_bool("CHECKIN_GENTLE_SHORT_TEXT", &raw)?,
                None => defaults.gentle_short_text,
            },
            short_text_max_chars: match get("CHECKIN_SHORT_TEXT_MAX") {
                Some(raw) => parse_number("CHECKIN_SHORT_TEXT_MAX", &raw)? as usize,
                None => DEFAULT_SHORT_TEXT_MAX_CHARS,
            },
            daily_reminders: match get("CHECKIN_DAILY_REMINDERS") {
                Some(raw) => parse_bool("CHECKIN_DAILY_REMINDERS", &raw)?,
                None => defaults.daily_reminders,
            },
        };

        Ok(Self {
            bot_token,
            db_path,
            api_base,
            poll_timeout,
            engine,
        })
    }

    /// Bot API client settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.bot_token.clone())
            .with_api_base(self.api_base.clone())
            .with_poll_timeout(self.poll_timeout)
    }

    /// The user table on disk.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.db_path.clone())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"[redacted]")
            .field("db_path", &self.db_path)
            .field("api_base", &self.api_base)
            .field("poll_timeout", &self.poll_timeout)
            .field("engine", &self.engine)
            .finish()
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
        }),
    }
}

fn parse_number(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN environment variable is required")]
    MissingToken,

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
