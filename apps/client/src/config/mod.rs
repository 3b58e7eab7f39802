//! Client configuration resolved from the environment.
//!
//! Environment variables must be set by the runtime environment; CLI flags
//! override them (see `main.rs`).

pub mod api;

use std::env;

pub use api::{ApiConfig, Endpoints};

use crate::domain::GuessMode;
use crate::error::ConfigError;

pub const ENV_API_BASE_URL: &str = "COMMENT_GUESSER_API_BASE_URL";
pub const ENV_MODE: &str = "COMMENT_GUESSER_MODE";
pub const ENV_VIDEO_SECONDS: &str = "COMMENT_GUESSER_VIDEO_SECONDS";
pub const ENV_HTTP_TIMEOUT_MS: &str = "COMMENT_GUESSER_HTTP_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api: ApiConfig,
    /// Assumed video length for the wall-clock player. `None` disables the
    /// player, so every guess scores with the full time-left bucket.
    pub video_seconds: Option<f64>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut api = ApiConfig::default();

        if let Some(raw) = non_empty(lookup(ENV_API_BASE_URL)) {
            api.base_url = api::normalize_base_url(&raw)?;
        }
        if let Some(raw) = non_empty(lookup(ENV_MODE)) {
            api.mode = raw
                .parse::<GuessMode>()
                .map_err(|e| ConfigError::invalid_var(ENV_MODE, e))?;
        }
        if let Some(raw) = non_empty(lookup(ENV_HTTP_TIMEOUT_MS)) {
            api.timeout = api::parse_timeout_ms(ENV_HTTP_TIMEOUT_MS, &raw)?;
        }

        let video_seconds = non_empty(lookup(ENV_VIDEO_SECONDS))
            .map(|raw| parse_video_seconds(ENV_VIDEO_SECONDS, &raw))
            .transpose()?;

        Ok(Self { api, video_seconds })
    }
}

/// Video length must be a positive, finite number of seconds.
pub fn parse_video_seconds(name: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let secs = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ConfigError::invalid_var(name, format!("'{raw}' is not a number: {e}")))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::invalid_var(
            name,
            format!("'{raw}' must be a positive number of seconds"),
        ));
    }
    Ok(secs)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
