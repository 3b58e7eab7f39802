use thiserror::Error;

/// The two network operations a round goes through.
///
/// Each operation carries its own user-facing fallback message, shown when
/// the backend does not supply a `detail` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchRound,
    SubmitGuess,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FetchRound => "fetch_round",
            Self::SubmitGuess => "submit_guess",
        }
    }

    pub const fn fallback_message(&self) -> &'static str {
        match self {
            Self::FetchRound => "Unable to fetch a new video right now. Please try again soon.",
            Self::SubmitGuess => "We could not score that guess. Please try a new round.",
        }
    }
}

/// Failures talking to the game backend.
///
/// Cancellation is deliberately absent: a cancelled fetch is an outcome of
/// its own and never reaches this type.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {detail}")]
    Network { detail: String },
    #[error("HTTP {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Http { status: u16, detail: Option<String> },
    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    pub fn http(status: u16, detail: Option<String>) -> Self {
        Self::Http { status, detail }
    }

    /// Server-supplied detail, if the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message shown to the player for a failure during `op`.
    pub fn user_message(&self, op: Operation) -> String {
        self.detail()
            .map(str::to_owned)
            .unwrap_or_else(|| op.fallback_message().to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {detail}")]
    InvalidVar { name: &'static str, detail: String },
    #[error("Invalid API base URL '{url}': {detail}")]
    InvalidBaseUrl { url: String, detail: String },
}

impl ConfigError {
    pub fn invalid_var(name: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidVar {
            name,
            detail: detail.into(),
        }
    }
}
