//! Video playback position, as far as scoring cares.
//!
//! A player only answers duration/position queries after it has signalled
//! readiness through a one-shot notification. Until then, and whenever no
//! player is attached, scoring sees [`PlaybackSnapshot::unavailable`].

pub mod wall_clock;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::debug;

pub use wall_clock::WallClockPlayer;

use crate::domain::PlaybackSnapshot;

/// Read side of an embedded video player.
pub trait PlaybackClock: Send {
    /// Total length in seconds; 0 when unknown.
    fn duration(&self) -> f64;
    /// Current position in seconds.
    fn current_time(&self) -> f64;
}

/// Fired by a player once it can answer position queries.
#[derive(Debug)]
pub struct ReadySignal(oneshot::Sender<()>);

impl ReadySignal {
    pub fn notify(self) {
        // A dropped receiver means the player was already replaced.
        let _ = self.0.send(());
    }
}

/// Consumed by [`PlayerSlot`] to unlock position reads.
#[derive(Debug)]
pub struct ReadyNotification(oneshot::Receiver<()>);

pub fn ready_channel() -> (ReadySignal, ReadyNotification) {
    let (tx, rx) = oneshot::channel();
    (ReadySignal(tx), ReadyNotification(rx))
}

enum Readiness {
    Waiting(ReadyNotification),
    Ready,
    Never,
}

/// The player for the round currently on screen, if any.
#[derive(Default)]
pub struct PlayerSlot {
    attached: Option<(Box<dyn PlaybackClock>, Readiness)>,
}

impl PlayerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any previous player.
    pub fn attach(&mut self, player: Box<dyn PlaybackClock>, ready: ReadyNotification) {
        self.attached = Some((player, Readiness::Waiting(ready)));
    }

    pub fn detach(&mut self) {
        if self.attached.take().is_some() {
            debug!("Player detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Poll the ready notification without blocking.
    pub fn is_ready(&mut self) -> bool {
        let Some((_, readiness)) = self.attached.as_mut() else {
            return false;
        };
        if let Readiness::Waiting(ReadyNotification(rx)) = readiness {
            *readiness = match rx.try_recv() {
                Ok(()) => Readiness::Ready,
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Closed) => Readiness::Never,
            };
        }
        matches!(readiness, Readiness::Ready)
    }

    pub fn snapshot(&mut self) -> PlaybackSnapshot {
        if !self.is_ready() {
            return PlaybackSnapshot::unavailable();
        }
        match self.attached.as_ref() {
            Some((player, _)) => PlaybackSnapshot::new(player.duration(), player.current_time()),
            None => PlaybackSnapshot::unavailable(),
        }
    }
}

impl std::fmt::Debug for PlayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSlot")
            .field("attached", &self.attached.is_some())
            .finish()
    }
}
