use crate::domain::round::CommentId;
use crate::domain::scoring;

/// A round option with its likes and correctness revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedOption {
    pub comment_id: CommentId,
    pub text: String,
    pub likes: u64,
    pub is_correct: bool,
}

/// Backend verdict for a top-pick guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub is_correct: bool,
    pub selected_option_id: CommentId,
    pub options: Vec<RevealedOption>,
}

impl GuessResult {
    pub fn option(&self, id: &CommentId) -> Option<&RevealedOption> {
        self.options.iter().find(|o| &o.comment_id == id)
    }

    /// 1-based likes rank of the selected option.
    pub fn selected_rank(&self) -> Option<usize> {
        scoring::rank_of(&self.options, &self.selected_option_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedComment {
    pub id: CommentId,
    pub text: String,
    pub likes: u64,
}

/// Backend verdict for a blind ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingResult {
    /// 0..=100, computed by the backend from rank deviations.
    pub score: u32,
    pub user_ranking: Vec<CommentId>,
    /// Most liked first.
    pub correct_ranking: Vec<RankedComment>,
}

impl RankingResult {
    /// One report row per comment, in correct order.
    pub fn rows(&self) -> Vec<RankingRow> {
        self.correct_ranking
            .iter()
            .enumerate()
            .map(|(actual_idx, comment)| {
                let user_idx = self.user_ranking.iter().position(|id| id == &comment.id);
                RankingRow {
                    actual_rank: actual_idx + 1,
                    comment: comment.clone(),
                    user_rank: user_idx.map(|idx| idx + 1),
                    deviation: Deviation::between(user_idx, actual_idx),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub actual_rank: usize,
    pub comment: RankedComment,
    pub user_rank: Option<usize>,
    pub deviation: Deviation,
}

/// How far the player's placement was from the real position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deviation {
    Perfect,
    /// `user index - actual index`; positive means ranked too low.
    Off(i64),
    /// The comment is missing from the player's ranking.
    Unranked,
}

impl Deviation {
    fn between(user_idx: Option<usize>, actual_idx: usize) -> Self {
        match user_idx {
            None => Self::Unranked,
            Some(user) if user == actual_idx => Self::Perfect,
            Some(user) => Self::Off(user as i64 - actual_idx as i64),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Perfect => "Perfect".to_string(),
            Self::Off(d) if *d > 0 => format!("-{d}"),
            Self::Off(d) => format!("+{}", d.abs()),
            Self::Unranked => "n/a".to_string(),
        }
    }

    /// More than two places out.
    pub fn is_severe(&self) -> bool {
        match self {
            Self::Off(d) => d.abs() > 2,
            Self::Unranked => true,
            Self::Perfect => false,
        }
    }
}

/// What the backend revealed after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    TopPick(GuessResult),
    Ranking(RankingResult),
}
