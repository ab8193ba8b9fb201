use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const ENV_SUPABASE_URL: &str = "FV_SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "FV_SUPABASE_ANON_KEY";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "FV_REQUEST_TIMEOUT_SECS";
pub const ENV_CURRENCY_SYMBOL: &str = "FV_CURRENCY_SYMBOL";

/// Default HTTP timeout for backend calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection and display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the hosted backend, e.g. "https://abc.supabase.co"
    pub backend_url: String,

    /// Public (anon) API key sent with every request.
    pub anon_key: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Symbol shown next to amounts.
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            anon_key: String::new(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            currency_symbol: "£".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment (and a `.env` file if present).
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// The backend URL and anon key are required; everything else falls back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend_url = lookup(ENV_SUPABASE_URL)
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::Config(format!("{ENV_SUPABASE_URL} is not set")))?;
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(CoreError::Config(format!(
                "{ENV_SUPABASE_URL} must start with http:// or https:// (got '{backend_url}')"
            )));
        }

        let anon_key = lookup(ENV_SUPABASE_ANON_KEY)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::Config(format!("{ENV_SUPABASE_ANON_KEY} is not set")))?;

        let request_timeout_secs = match lookup(ENV_REQUEST_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                CoreError::Config(format!(
                    "{ENV_REQUEST_TIMEOUT_SECS} must be a positive integer (got '{raw}')"
                ))
            })?,
            None => defaults.request_timeout_secs,
        };

        let currency_symbol = lookup(ENV_CURRENCY_SYMBOL)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.currency_symbol);

        Ok(Self {
            backend_url,
            anon_key,
            request_timeout_secs,
            currency_symbol,
        })
    }
}
