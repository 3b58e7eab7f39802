use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{RoundController, Transition};
use crate::domain::{Phase, Round, Selection};
use crate::error::{ApiError, Operation};
use crate::services::game_api::GameApi;

/// A round fetch that has been requested but not yet run.
pub struct RoundFetch {
    api: Arc<dyn GameApi>,
    generation: u64,
    token: CancellationToken,
}

impl RoundFetch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Perform the network call, giving up as soon as the token is cancelled.
    pub async fn run(self) -> FetchCompletion {
        let outcome = tokio::select! {
            biased;
            _ = self.token.cancelled() => FetchOutcome::Cancelled,
            result = self.api.fetch_round() => match result {
                Ok(round) => FetchOutcome::Loaded(round),
                Err(err) => FetchOutcome::Failed(err),
            },
        };
        FetchCompletion {
            generation: self.generation,
            token: self.token,
            outcome,
        }
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    Loaded(Round),
    Failed(ApiError),
    /// Not an error: the result is dropped without a state change.
    Cancelled,
}

#[derive(Debug)]
pub struct FetchCompletion {
    generation: u64,
    token: CancellationToken,
    outcome: FetchOutcome,
}

impl FetchCompletion {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn outcome(&self) -> &FetchOutcome {
        &self.outcome
    }
}

impl RoundController {
    /// First fetch after start-up.
    pub fn mount(&mut self) -> Option<RoundFetch> {
        if !matches!(self.phase, Phase::Idle) {
            return None;
        }
        self.request_round()
    }

    /// "Next video" once the current round is revealed.
    pub fn next_round(&mut self) -> Option<RoundFetch> {
        if !matches!(self.phase, Phase::Revealed { .. }) {
            return None;
        }
        self.request_round()
    }

    /// "Try again" after an error.
    pub fn retry(&mut self) -> Option<RoundFetch> {
        if !matches!(self.phase, Phase::Error { .. }) {
            return None;
        }
        self.request_round()
    }

    /// Enter `Loading`, cancelling any fetch already in flight.
    ///
    /// Refused while a guess is being submitted.
    pub fn request_round(&mut self) -> Option<RoundFetch> {
        if self.phase.is_submitting() {
            debug!("Round request refused while submitting");
            return None;
        }

        self.cancel_in_flight();
        self.generation += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.player.detach();

        debug!(
            from = self.phase.name(),
            generation = self.generation,
            "Transition: -> Loading"
        );
        self.phase = Phase::Loading;

        info!(
            generation = self.generation,
            mode = self.mode.as_str(),
            "Requesting round"
        );
        Some(RoundFetch {
            api: Arc::clone(&self.api),
            generation: self.generation,
            token,
        })
    }

    /// Apply a finished fetch unless it was cancelled or superseded.
    pub fn complete_fetch(&mut self, completion: FetchCompletion) -> Transition {
        let FetchCompletion {
            generation,
            token,
            outcome,
        } = completion;

        if token.is_cancelled() || generation != self.generation || !self.phase.is_loading() {
            debug!(
                generation,
                current = self.generation,
                "Discarding stale round fetch"
            );
            return Transition::Ignored;
        }

        match outcome {
            FetchOutcome::Cancelled => Transition::Ignored,
            FetchOutcome::Loaded(round) => {
                self.in_flight = None;
                info!(
                    round_id = %round.round_id,
                    options = round.options.len(),
                    "Round loaded"
                );
                debug!(generation, "Transition: Loading -> Ready");
                let selection = Selection::empty(self.mode, &round);
                self.phase = Phase::Ready { round, selection };
                Transition::Applied
            }
            FetchOutcome::Failed(err) => {
                self.in_flight = None;
                let operation = Operation::FetchRound;
                warn!(
                    operation = operation.as_str(),
                    error = %err,
                    "Round fetch failed"
                );
                self.phase = Phase::Error {
                    operation,
                    message: err.user_message(operation),
                };
                Transition::Applied
            }
        }
    }

    /// Request, await and apply a round fetch in one go.
    pub async fn load_round(&mut self) -> Transition {
        let Some(fetch) = self.request_round() else {
            return Transition::Ignored;
        };
        let completion = fetch.run().await;
        self.complete_fetch(completion)
    }
}
