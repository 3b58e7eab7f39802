use std::time::Duration;

use reqwest::Url;

use crate::domain::GuessMode;
use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_millis(10_000);

pub const GET_ROUND_PATH: &str = "/api/get-game-round";
pub const SUBMIT_GUESS_PATH: &str = "/api/submit-guess";
pub const DAILY_CHALLENGE_PATH: &str = "/api/daily-challenge";
pub const SUBMIT_RANK_PATH: &str = "/api/submit-rank";

/// Backend location and contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Absolute base URL without a trailing slash.
    pub base_url: String,
    pub mode: GuessMode,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            mode: GuessMode::default(),
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str, mode: GuessMode) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            mode,
            ..Self::default()
        })
    }

    pub fn endpoints(&self) -> Endpoints {
        let base = &self.base_url;
        let round_path = match self.mode {
            GuessMode::TopPick => GET_ROUND_PATH,
            GuessMode::Ranking => DAILY_CHALLENGE_PATH,
        };
        Endpoints {
            round: format!("{base}{round_path}"),
            submit_guess: format!("{base}{SUBMIT_GUESS_PATH}"),
            submit_rank: format!("{base}{SUBMIT_RANK_PATH}"),
        }
    }
}

/// Absolute endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Round source for the configured mode.
    pub round: String,
    pub submit_guess: String,
    pub submit_rank: String,
}

/// Validate an http(s) base URL and drop one trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |detail: String| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        detail,
    };

    let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }

    Ok(trimmed.strip_suffix('/').unwrap_or(trimmed).to_string())
}

pub fn parse_timeout_ms(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let ms = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::invalid_var(name, format!("'{raw}' is not a number: {e}")))?;
    if ms == 0 {
        return Err(ConfigError::invalid_var(name, "timeout must be positive"));
    }
    Ok(Duration::from_millis(ms))
}
