//! Domain layer: pure round, guess, reveal and scoring logic.

pub mod guess;
pub mod likes;
pub mod reveal;
pub mod round;
pub mod scoring;
pub mod state;
pub mod video;

#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use guess::{Guess, GuessMode, RankingDraft, Selection};
pub use reveal::{
    Deviation, GuessResult, RankedComment, RankingResult, RankingRow, Reveal, RevealedOption,
};
pub use round::{option_label, CommentId, CommentOption, Round, RoundId};
pub use scoring::{PlaybackSnapshot, RoundOutcome, Scoreboard};
pub use state::{Phase, Stage};
