use tokio::time::Instant;

use crate::player::PlaybackClock;

/// Pretends a video of known length started playing when it was created.
///
/// The terminal front-end cannot play the video itself, so the assumed
/// length and the wall clock stand in for the embedded player.
#[derive(Debug, Clone)]
pub struct WallClockPlayer {
    started: Instant,
    duration: f64,
}

impl WallClockPlayer {
    pub fn start(duration_secs: f64) -> Self {
        Self {
            started: Instant::now(),
            duration: duration_secs.max(0.0),
        }
    }
}

impl PlaybackClock for WallClockPlayer {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn current_time(&self) -> f64 {
        self.started.elapsed().as_secs_f64().min(self.duration)
    }
}
