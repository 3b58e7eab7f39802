//! Backend seam used by the round controller.

use async_trait::async_trait;

use crate::domain::{Guess, Reveal, Round, RoundId};
use crate::error::ApiError;

/// The two calls a round needs.
///
/// Implementations must not retry on their own; retry is a player action.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Fetch a fresh round for the configured contract.
    async fn fetch_round(&self) -> Result<Round, ApiError>;

    /// Submit a complete guess for `round_id`.
    async fn submit_guess(&self, round_id: &RoundId, guess: &Guess) -> Result<Reveal, ApiError>;
}
