use std::str::FromStr;

use serde::Serialize;

use crate::domain::round::{CommentId, Round};

/// Which backend contract the submit step speaks.
///
/// The round state machine is identical for both; only the shape of the
/// pending guess and of the reveal differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuessMode {
    /// Pick the single most-liked comment (system of record).
    #[default]
    TopPick,
    /// Blind-rank every comment from most to least liked.
    Ranking,
}

impl GuessMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TopPick => "top-pick",
            Self::Ranking => "ranking",
        }
    }
}

impl FromStr for GuessMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-pick" | "top_pick" | "toppick" => Ok(Self::TopPick),
            "ranking" | "rank" => Ok(Self::Ranking),
            other => Err(format!("unknown guess mode '{other}'")),
        }
    }
}

/// A complete guess, ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guess {
    TopPick(CommentId),
    /// Comment ids from rank 1 (most likes) downwards.
    Ranking(Vec<CommentId>),
}

impl Guess {
    /// The comment the player put first.
    pub fn top(&self) -> Option<&CommentId> {
        match self {
            Self::TopPick(id) => Some(id),
            Self::Ranking(ids) => ids.first(),
        }
    }
}

/// Blind ranking in progress.
///
/// Comments are dealt one at a time in display order; each one is dropped
/// into a free rank slot and can't be moved afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingDraft {
    incoming: Vec<CommentId>,
    slots: Vec<Option<CommentId>>,
    next: usize,
}

impl RankingDraft {
    pub fn new(round: &Round) -> Self {
        let incoming: Vec<CommentId> = round
            .options
            .iter()
            .map(|o| o.comment_id.clone())
            .collect();
        let slots = vec![None; incoming.len()];
        Self {
            incoming,
            slots,
            next: 0,
        }
    }

    /// Comment waiting to be placed, if any.
    pub fn current(&self) -> Option<&CommentId> {
        self.incoming.get(self.next)
    }

    pub fn remaining(&self) -> usize {
        self.incoming.len() - self.next
    }

    pub fn slots(&self) -> &[Option<CommentId>] {
        &self.slots
    }

    /// Place the current comment into the 0-based `slot`.
    ///
    /// Returns false when the slot is out of range or taken, or when every
    /// comment has already been placed.
    pub fn place(&mut self, slot: usize) -> bool {
        let Some(current) = self.incoming.get(self.next).cloned() else {
            return false;
        };
        match self.slots.get_mut(slot) {
            Some(entry) if entry.is_none() => {
                *entry = Some(current);
                self.next += 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Option::is_some)
    }

    /// Final ordering once every comment has a slot.
    pub fn ranking(&self) -> Option<Vec<CommentId>> {
        if !self.is_complete() {
            return None;
        }
        self.slots.iter().cloned().collect()
    }
}

/// What the player has chosen so far in a `Ready` round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    TopPick(Option<CommentId>),
    Ranking(RankingDraft),
}

impl Selection {
    pub fn empty(mode: GuessMode, round: &Round) -> Self {
        match mode {
            GuessMode::TopPick => Self::TopPick(None),
            GuessMode::Ranking => Self::Ranking(RankingDraft::new(round)),
        }
    }

    /// The submittable guess, once the selection is complete.
    pub fn guess(&self) -> Option<Guess> {
        match self {
            Self::TopPick(pick) => pick.clone().map(Guess::TopPick),
            Self::Ranking(draft) => draft.ranking().map(Guess::Ranking),
        }
    }

    pub fn picked(&self) -> Option<&CommentId> {
        match self {
            Self::TopPick(pick) => pick.as_ref(),
            Self::Ranking(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::TopPick(pick) => pick.is_none(),
            Self::Ranking(draft) => draft.slots().iter().all(Option::is_none),
        }
    }
}
