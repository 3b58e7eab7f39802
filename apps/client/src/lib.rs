#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod player;
pub mod protocol;
pub mod services;
pub mod telemetry;
pub mod ui;

// Re-exports for public API
pub use config::{ApiConfig, ClientConfig};
pub use domain::{CommentId, Guess, GuessMode, Phase, Reveal, Round, RoundId, Scoreboard};
pub use error::{ApiError, ConfigError, Operation};
pub use infra::http_api::HttpGameApi;
pub use services::game_api::GameApi;
pub use services::round_flow::{RoundController, Transition};
pub use ui::view::ViewState;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    client_test_support::logging::init();
}
