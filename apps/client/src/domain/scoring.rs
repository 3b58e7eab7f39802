//! Round scoring.
//!
//! The reward function is game-design policy: a correct top pick pays
//! `round(100 * (1.1 * streak + 1.1 * time_left_bucket))`, any other pick
//! wipes both streak and score.

use tracing::debug;

use crate::domain::reveal::{GuessResult, RevealedOption};
use crate::domain::round::CommentId;

pub const SCORE_BASE: f64 = 100.0;
pub const STREAK_WEIGHT: f64 = 1.1;
pub const TIME_LEFT_WEIGHT: f64 = 1.1;
pub const TIME_LEFT_BUCKETS: u8 = 10;

/// Player position at the moment a guess was scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSnapshot {
    duration: f64,
    current_time: f64,
}

impl PlaybackSnapshot {
    /// Non-finite or negative readings are treated as zero.
    pub fn new(duration: f64, current_time: f64) -> Self {
        let sane = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            duration: sane(duration),
            current_time: sane(current_time),
        }
    }

    /// No player: scores as if the whole video remained.
    pub fn unavailable() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn time_left_bucket(&self) -> u8 {
        time_left_bucket(self.duration, self.current_time)
    }
}

/// Remaining playback, discretised into 0..=10. Higher means a faster answer.
pub fn time_left_bucket(duration: f64, current_time: f64) -> u8 {
    let remaining = (duration - current_time).max(0.0);
    let ratio = if duration > 0.0 {
        remaining / duration
    } else {
        1.0
    };
    let bucket = (ratio * f64::from(TIME_LEFT_BUCKETS)).floor();
    bucket.clamp(0.0, f64::from(TIME_LEFT_BUCKETS)) as u8
}

/// 1-based position of `selected` when `options` are sorted by likes,
/// most liked first. Ties keep their original relative order.
pub fn rank_of(options: &[RevealedOption], selected: &CommentId) -> Option<usize> {
    let mut sorted: Vec<&RevealedOption> = options.iter().collect();
    sorted.sort_by(|a, b| b.likes.cmp(&a.likes));
    sorted
        .iter()
        .position(|o| &o.comment_id == selected)
        .map(|idx| idx + 1)
}

pub fn round_score(next_streak: u32, time_left_bucket: u8) -> u64 {
    let raw = SCORE_BASE
        * (STREAK_WEIGHT * f64::from(next_streak)
            + TIME_LEFT_WEIGHT * f64::from(time_left_bucket));
    raw.round() as u64
}

/// Result of scoring one round, kept for the reveal screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub rank: Option<usize>,
    pub is_top: bool,
    pub time_left_bucket: u8,
    pub round_score: u64,
    pub streak: u32,
}

/// Session-long streak and score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    streak: u32,
    score: u64,
    last_round_score: Option<u64>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn last_round_score(&self) -> Option<u64> {
        self.last_round_score
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a top-pick verdict.
    pub fn apply_top_pick(&mut self, is_top: bool, time_left_bucket: u8) -> u64 {
        if is_top {
            let next_streak = self.streak.saturating_add(1);
            let earned = round_score(next_streak, time_left_bucket);
            self.streak = next_streak;
            self.score = self.score.saturating_add(earned);
            self.last_round_score = Some(earned);
            earned
        } else {
            self.streak = 0;
            self.score = 0;
            self.last_round_score = Some(0);
            0
        }
    }

    /// Ranking rounds report the backend score without touching streak or total.
    pub fn record_ranking(&mut self, server_score: u32) {
        self.last_round_score = Some(u64::from(server_score));
    }
}

/// Score a top-pick reveal against the playback position.
pub fn score_top_pick(
    board: &mut Scoreboard,
    result: &GuessResult,
    playback: PlaybackSnapshot,
) -> RoundOutcome {
    let rank = result.selected_rank();
    let is_top = rank == Some(1);
    let bucket = playback.time_left_bucket();
    let round_score = board.apply_top_pick(is_top, bucket);

    debug!(
        ?rank,
        is_top,
        time_left_bucket = bucket,
        round_score,
        streak = board.streak(),
        "Scored top pick"
    );

    RoundOutcome {
        rank,
        is_top,
        time_left_bucket: bucket,
        round_score,
        streak: board.streak(),
    }
}
