//! Round/guess controller.
//!
//! Each network operation runs in three steps so an event loop can keep
//! handling input while it is in flight:
//! 1. `request_round` / `begin_submit` perform the state transition and hand
//!    back a `Send` work item;
//! 2. the caller awaits `run()` on that item;
//! 3. `complete_fetch` / `complete_submit` apply the outcome, or ignore it
//!    when it was cancelled or superseded in the meantime.

mod guess_submission;
mod round_lifecycle;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use guess_submission::{GuessSubmission, SubmitCompletion};
pub use round_lifecycle::{FetchCompletion, FetchOutcome, RoundFetch};

use crate::domain::{GuessMode, Phase, Scoreboard};
use crate::player::{PlaybackClock, PlayerSlot, ReadyNotification};
use crate::services::game_api::GameApi;
use crate::ui::view::ViewState;

/// Whether a completion or input changed the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Owns the round lifecycle, the scoreboard and the current player.
pub struct RoundController {
    api: Arc<dyn GameApi>,
    mode: GuessMode,
    phase: Phase,
    scoreboard: Scoreboard,
    player: PlayerSlot,
    /// Token of the round fetch currently in flight.
    in_flight: Option<CancellationToken>,
    /// Bumped on every round request; stale completions carry an older value.
    generation: u64,
}

impl RoundController {
    pub fn new(api: Arc<dyn GameApi>, mode: GuessMode) -> Self {
        Self {
            api,
            mode,
            phase: Phase::Idle,
            scoreboard: Scoreboard::new(),
            player: PlayerSlot::new(),
            in_flight: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn mode(&self) -> GuessMode {
        self.mode
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn view(&self) -> ViewState {
        ViewState::new(self.mode, &self.phase, &self.scoreboard)
    }

    pub fn reset_scoreboard(&mut self) {
        debug!("Scoreboard reset");
        self.scoreboard.reset();
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Attach the player for the round on screen.
    ///
    /// Refused unless a round is waiting for a guess; the player is dropped
    /// again whenever the round is replaced or lost to an error.
    pub fn attach_player(
        &mut self,
        player: Box<dyn PlaybackClock>,
        ready: ReadyNotification,
    ) -> bool {
        if !matches!(self.phase, Phase::Ready { .. }) {
            return false;
        }
        self.player.attach(player, ready);
        debug!(generation = self.generation, "Player attached");
        true
    }

    pub fn is_player_ready(&mut self) -> bool {
        self.player.is_ready()
    }

    /// Cancel any in-flight fetch. Later completions of it are ignored.
    pub fn unmount(&mut self) {
        self.cancel_in_flight();
        self.player.detach();
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
            debug!(generation = self.generation, "Cancelled in-flight round fetch");
        }
    }
}

impl Drop for RoundController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

impl std::fmt::Debug for RoundController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundController")
            .field("mode", &self.mode)
            .field("phase", &self.phase.name())
            .field("scoreboard", &self.scoreboard)
            .field("generation", &self.generation)
            .finish()
    }
}
