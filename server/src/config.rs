//! Server configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (if present) and then builds a [`ServerConfig`] once.
//! Everything downstream receives typed values instead of reading the
//! environment itself.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_STORAGE_ROOT: &str = "./data/storage";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_RESEND_FROM: &str = "Recipe Manager <login@recipes.local>";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Email access-code delivery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    /// Resend API key. Codes are not emailed when absent.
    pub resend_api_key: Option<String>,
    pub resend_from: String,
    /// Return the generated code in the HTTP response (local development).
    pub echo_code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub storage_root: PathBuf,
    pub max_upload_bytes: usize,
    pub cookie_secure: bool,
    pub email: EmailConfig,
}

impl ServerConfig {
    /// Build config from the process environment.
    ///
    /// Required: `DATABASE_URL`.
    ///
    /// Optional: `PORT` (3000), `DB_MAX_CONNECTIONS` (5), `STORAGE_ROOT`
    /// (`./data/storage`), `STORAGE_MAX_UPLOAD_BYTES` (10 MiB),
    /// `COOKIE_SECURE` (false), `RESEND_API_KEY`, `RESEND_FROM`,
    /// `EMAIL_AUTH_ECHO_CODE` (false).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// numeric/boolean variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        let storage_root = lookup("STORAGE_ROOT").map_or_else(|| PathBuf::from(DEFAULT_STORAGE_ROOT), PathBuf::from);
        let max_upload_bytes = parse_or(&lookup, "STORAGE_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        let cookie_secure = bool_or(&lookup, "COOKIE_SECURE", false)?;

        let email = EmailConfig {
            resend_api_key: lookup("RESEND_API_KEY").filter(|v| !v.trim().is_empty()),
            resend_from: lookup("RESEND_FROM").unwrap_or_else(|| DEFAULT_RESEND_FROM.to_owned()),
            echo_code: bool_or(&lookup, "EMAIL_AUTH_ECHO_CODE", false)?,
        };

        Ok(Self { database_url, port, db_max_connections, storage_root, max_upload_bytes, cookie_secure, email })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

fn bool_or<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key, value: raw }),
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
