use crate::domain::guess::{Guess, Selection};
use crate::domain::reveal::Reveal;
use crate::domain::round::Round;
use crate::domain::scoring::RoundOutcome;
use crate::error::Operation;

/// Round lifecycle.
///
/// Each variant owns exactly the data that is valid in it, so a round, a
/// pending guess and a reveal can never be observed in an inconsistent mix.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    /// A round fetch is in flight.
    Loading,
    /// Round on screen; the player is choosing.
    Ready { round: Round, selection: Selection },
    /// Guess posted; waiting for the verdict.
    Submitting { round: Round, guess: Guess },
    /// Verdict received.
    Revealed {
        round: Round,
        guess: Guess,
        reveal: Reveal,
        /// Present for top-pick rounds.
        outcome: Option<RoundOutcome>,
    },
    /// A fetch or submission failed; only a retry leaves this phase.
    Error { operation: Operation, message: String },
}

/// Coarse observation of a phase: what is on screen, ignoring network state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    NoRound,
    AwaitingGuess,
    GuessPending,
    Revealed,
}

impl Phase {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready { .. } => "ready",
            Self::Submitting { .. } => "submitting",
            Self::Revealed { .. } => "revealed",
            Self::Error { .. } => "error",
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::Idle | Self::Loading | Self::Error { .. } => Stage::NoRound,
            Self::Ready { selection, .. } if selection.guess().is_some() => Stage::GuessPending,
            Self::Ready { .. } => Stage::AwaitingGuess,
            Self::Submitting { .. } => Stage::GuessPending,
            Self::Revealed { .. } => Stage::Revealed,
        }
    }

    pub fn round(&self) -> Option<&Round> {
        match self {
            Self::Ready { round, .. }
            | Self::Submitting { round, .. }
            | Self::Revealed { round, .. } => Some(round),
            Self::Idle | Self::Loading | Self::Error { .. } => None,
        }
    }

    /// Guess that is chosen but not yet judged.
    pub fn pending_guess(&self) -> Option<Guess> {
        match self {
            Self::Ready { selection, .. } => selection.guess(),
            Self::Submitting { guess, .. } => Some(guess.clone()),
            _ => None,
        }
    }

    pub fn reveal(&self) -> Option<&Reveal> {
        match self {
            Self::Revealed { reveal, .. } => Some(reveal),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }
}
