//! Process configuration read from the environment once at startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";
pub const DEFAULT_LOBBY_MAX_AGE_SECS: u64 = 600;
pub const DEFAULT_LOBBY_SWEEP_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub catalog_path: PathBuf,
    /// Pending sessions older than this are swept from the lobby.
    pub lobby_max_age: time::Duration,
    pub lobby_sweep_every: std::time::Duration,
    /// Validated `http(s)://` origins; empty means the localhost fallback.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            lobby_max_age: time::Duration::seconds(DEFAULT_LOBBY_MAX_AGE_SECS as i64),
            lobby_sweep_every: std::time::Duration::from_secs(DEFAULT_LOBBY_SWEEP_SECS),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or blank keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("BACKEND_PORT", var("BACKEND_PORT"), DEFAULT_PORT)?;
        let catalog_path = var("CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

        let max_age_secs = parse_or(
            "LOBBY_MAX_AGE_SECS",
            var("LOBBY_MAX_AGE_SECS"),
            DEFAULT_LOBBY_MAX_AGE_SECS,
        )?;
        let sweep_secs = parse_or(
            "LOBBY_SWEEP_SECS",
            var("LOBBY_SWEEP_SECS"),
            DEFAULT_LOBBY_SWEEP_SECS,
        )?;
        if sweep_secs == 0 {
            return Err(AppError::config("LOBBY_SWEEP_SECS must be greater than zero"));
        }
        let max_age_secs = i64::try_from(max_age_secs)
            .map_err(|_| AppError::config("LOBBY_MAX_AGE_SECS is out of range"))?;

        Ok(Self {
            host,
            port,
            catalog_path,
            lobby_max_age: time::Duration::seconds(max_age_secs),
            lobby_sweep_every: std::time::Duration::from_secs(sweep_secs),
            cors_allowed_origins: parse_origins(var("CORS_ALLOWED_ORIGINS").as_deref()),
        })
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("{key} has an invalid value: {raw:?}"))),
    }
}

/// Comma-separated origins; empty, `null` and non-http entries are dropped.
fn parse_origins(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}
