//! Environment-backed configuration for the headlines client.
//!
//! `from_env` loads a `.env` from the working directory when one exists and
//! then reads `NEWS_API_KEY` and `NEWS_API_BASE_URL`. `from_lookup` takes the
//! variable source as a closure so tests never touch the process environment.

use std::env::{self, VarError};

use crate::client::DEFAULT_BASE_URL;
use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "NEWS_API_KEY";
pub const BASE_URL_VAR: &str = "NEWS_API_BASE_URL";

/// Connection settings handed to `NewsFetcher::from_config`.
#[derive(Clone)]
pub struct NewsConfig {
    pub api_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl NewsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read settings from the process environment, after loading a `.env`
    /// from the working directory if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is fine; the variables may be exported directly.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, VarError>,
    {
        let api_key = match lookup(API_KEY_VAR) {
            Ok(key) => key,
            Err(VarError::NotPresent) => return Err(ConfigError::MissingVar(API_KEY_VAR)),
            Err(VarError::NotUnicode(_)) => {
                return Err(ConfigError::NotUnicode { name: API_KEY_VAR })
            }
        };
        let base_url = match lookup(BASE_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => url,
            Ok(_) | Err(VarError::NotPresent) => DEFAULT_BASE_URL.to_string(),
            Err(VarError::NotUnicode(_)) => {
                return Err(ConfigError::NotUnicode { name: BASE_URL_VAR })
            }
        };
        Ok(Self { api_key, base_url })
    }
}
