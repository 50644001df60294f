//! Process configuration, read once from the environment in `main` and handed
//! to the components that need it.

use chrono::FixedOffset;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::report::{DEFAULT_TOP_N, MAX_CHUNK_CHARS};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where profile notes live and how reports are shaped.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub vault_path: PathBuf,
    /// Folder inside the vault holding one directory per profile.
    pub folder: String,
    pub top_n: usize,
    pub max_chunk_chars: usize,
    /// Pause between consecutive messages of one profile.
    pub pacing: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            vault_path: PathBuf::from("/work/obsidian-vault"),
            folder: "Real Estate Mission Control".to_string(),
            top_n: DEFAULT_TOP_N,
            max_chunk_chars: MAX_CHUNK_CHARS,
            pacing: Duration::from_millis(500),
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            vault_path: lookup("REPORT_VAULT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.vault_path),
            folder: lookup("REPORT_FOLDER").unwrap_or(defaults.folder),
            top_n: parse_or(&lookup, "REPORT_TOP_N", defaults.top_n)?,
            ..defaults
        })
    }

    /// Directory whose subdirectories are the profiles.
    pub fn profiles_root(&self) -> PathBuf {
        self.vault_path.join(&self.folder)
    }
}

/// Telegram Bot API credentials and destination.
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl TelegramConfig {
    pub const DEFAULT_API_BASE: &'static str = "https://api.telegram.org";

    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: Self::DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token = required(&lookup, "TELEGRAM_BOT_TOKEN")?;
        let chat_id = required(&lookup, "TELEGRAM_CHAT_ID")?;

        let mut config = Self::new(bot_token, chat_id);
        if let Some(base) = lookup("TELEGRAM_API_BASE").filter(|s| !s.trim().is_empty()) {
            config.api_base = base;
        }
        Ok(config)
    }
}

// Keep the token out of logs.
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Daily wall-clock time for the scheduled run.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleConfig {
    pub hour: u32,
    pub minute: u32,
    /// Fixed offset the hour is expressed in; DST is not followed.
    pub utc_offset: FixedOffset,
    pub run_on_start: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        // 07:00 US Central standard time, 13:00 UTC
        Self {
            hour: 7,
            minute: 0,
            utc_offset: FixedOffset::west_opt(6 * 3600).expect("-06:00 is a valid offset"),
            run_on_start: true,
        }
    }
}

impl ScheduleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let hour = parse_or(&lookup, "REPORT_HOUR", defaults.hour)?;
        if hour > 23 {
            return Err(invalid("REPORT_HOUR", hour));
        }
        let minute = parse_or(&lookup, "REPORT_MINUTE", defaults.minute)?;
        if minute > 59 {
            return Err(invalid("REPORT_MINUTE", minute));
        }

        let utc_offset = match lookup("REPORT_UTC_OFFSET") {
            None => defaults.utc_offset,
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|hours| hours.checked_mul(3600))
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| invalid("REPORT_UTC_OFFSET", raw))?,
        };

        Ok(Self {
            hour,
            minute,
            utc_offset,
            ..defaults
        })
    }
}

/// Static file server settings.
#[derive(Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub root_dir: PathBuf,
    /// Value returned by `/api/config-key`.
    pub config_key: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8893,
            root_dir: PathBuf::from("."),
            config_key: String::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: parse_or(&lookup, "SERVER_HOST", defaults.host)?,
            port: parse_or(&lookup, "SERVER_PORT", defaults.port)?,
            root_dir: lookup("SERVER_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.root_dir),
            config_key: lookup("OPENAI_API_KEY").unwrap_or_default(),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("root_dir", &self.root_dir)
            .field("config_key", &"<redacted>")
            .finish()
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| invalid(name, raw)),
    }
}

fn invalid(name: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
    }
}
