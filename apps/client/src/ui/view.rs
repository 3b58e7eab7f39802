//! Public snapshot of the controller for renderers.
//!
//! Everything a front-end needs is precomputed here (labels, badges, button
//! availability, formatted likes) so renderers stay free of game rules.

use serde::Serialize;

use crate::domain::likes::{format_compact, format_grouped};
use crate::domain::video::embed_url;
use crate::domain::{
    option_label, CommentId, Guess, GuessMode, GuessResult, Phase, RankingDraft, RankingResult,
    Reveal, Round, Scoreboard, Selection,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewState {
    pub mode: GuessMode,
    pub status: String,
    pub scoreboard: ScoreView,
    /// `None` while no round is on screen.
    pub video: Option<VideoView>,
    pub theme: Option<String>,
    pub choices: Vec<ChoiceView>,
    pub ranking: Option<RankingBoardView>,
    pub report: Option<RankingReportView>,
    pub error: Option<String>,
    pub controls: Controls,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreView {
    pub streak: u32,
    pub score: u64,
    /// Signed delta of the last round, e.g. `+880`.
    pub last_round: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VideoView {
    Embed { video_id: String, embed_url: String },
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceState {
    Idle,
    Selected,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Badge {
    TopComment,
    YourPick,
}

impl Badge {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TopComment => "Top comment",
            Self::YourPick => "Your pick",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub label: String,
    pub comment_id: CommentId,
    pub text: String,
    pub state: ChoiceState,
    pub disabled: bool,
    pub badges: Vec<Badge>,
    /// Compact likes, only once revealed.
    pub likes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankingBoardView {
    /// Text of the comment waiting to be placed.
    pub current: Option<String>,
    pub remaining: usize,
    pub slots: Vec<SlotView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub rank: usize,
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankingReportView {
    pub score: u32,
    pub rows: Vec<ReportRowView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportRowView {
    pub actual_rank: usize,
    pub text: String,
    pub likes: String,
    pub user_rank: Option<usize>,
    pub deviation: String,
    pub severe: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub submit_enabled: bool,
    pub next_enabled: bool,
    pub retry_enabled: bool,
}

impl ViewState {
    pub fn new(mode: GuessMode, phase: &Phase, scoreboard: &Scoreboard) -> Self {
        let round = phase.round();
        let mut view = Self {
            mode,
            status: status_line(mode, phase),
            scoreboard: score_view(scoreboard),
            video: round.map(video_view),
            theme: round.and_then(|r| r.theme.clone()),
            choices: Vec::new(),
            ranking: None,
            report: None,
            error: phase.error_message().map(str::to_owned),
            controls: controls(phase),
        };

        match phase {
            Phase::Ready { round, selection } => match selection {
                Selection::TopPick(pick) => {
                    view.choices = pending_choices(round, pick.as_ref(), false);
                }
                Selection::Ranking(draft) => {
                    view.ranking = Some(draft_board(round, draft));
                }
            },
            Phase::Submitting { round, guess } => match guess {
                Guess::TopPick(pick) => {
                    view.choices = pending_choices(round, Some(pick), true);
                }
                Guess::Ranking(order) => {
                    view.ranking = Some(locked_board(round, order));
                }
            },
            Phase::Revealed { round, reveal, .. } => match reveal {
                Reveal::TopPick(result) => view.choices = revealed_choices(round, result),
                Reveal::Ranking(result) => view.report = Some(report(result)),
            },
            Phase::Idle | Phase::Loading | Phase::Error { .. } => {}
        }

        view
    }

    pub fn is_busy(&self) -> bool {
        !self.controls.submit_enabled && !self.controls.next_enabled && !self.controls.retry_enabled
    }
}

fn status_line(mode: GuessMode, phase: &Phase) -> String {
    match phase {
        Phase::Idle => "Starting up".to_owned(),
        Phase::Loading => "Fetching a new short and its comment section...".to_owned(),
        Phase::Ready { .. } => match mode {
            GuessMode::TopPick => "Which comment got the most likes?".to_owned(),
            GuessMode::Ranking => "Rank the comments from most to least liked".to_owned(),
        },
        Phase::Submitting { .. } => "Scoring your guess...".to_owned(),
        Phase::Revealed { reveal, .. } => match reveal {
            Reveal::TopPick(result) if result.is_correct => "You found the top comment!".to_owned(),
            Reveal::TopPick(_) => "Not the top comment this time".to_owned(),
            Reveal::Ranking(result) => format!("Ranking scored {}/100", result.score),
        },
        Phase::Error { .. } => "We hit a snag".to_owned(),
    }
}

fn score_view(board: &Scoreboard) -> ScoreView {
    ScoreView {
        streak: board.streak(),
        score: board.score(),
        last_round: board.last_round_score().map(|delta| format!("+{delta}")),
    }
}

fn video_view(round: &Round) -> VideoView {
    match round.video_id() {
        Some(video_id) => VideoView::Embed {
            embed_url: embed_url(&video_id),
            video_id,
        },
        None => VideoView::Unavailable,
    }
}

fn controls(phase: &Phase) -> Controls {
    Controls {
        submit_enabled: matches!(
            phase,
            Phase::Ready { selection, .. } if selection.guess().is_some()
        ),
        next_enabled: matches!(phase, Phase::Revealed { .. }),
        retry_enabled: matches!(phase, Phase::Error { .. }),
    }
}

fn pending_choices(round: &Round, pick: Option<&CommentId>, disabled: bool) -> Vec<ChoiceView> {
    round
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| ChoiceView {
            label: option_label(idx),
            comment_id: option.comment_id.clone(),
            text: option.text.clone(),
            state: if pick == Some(&option.comment_id) {
                ChoiceState::Selected
            } else {
                ChoiceState::Idle
            },
            disabled,
            badges: Vec::new(),
            likes: None,
        })
        .collect()
}

fn revealed_choices(round: &Round, result: &GuessResult) -> Vec<ChoiceView> {
    round
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let revealed = result.option(&option.comment_id);
            let is_correct = revealed.is_some_and(|r| r.is_correct);
            let is_pick = result.selected_option_id == option.comment_id;

            let mut badges = Vec::new();
            let state = if is_correct {
                badges.push(Badge::TopComment);
                ChoiceState::Correct
            } else if is_pick {
                badges.push(Badge::YourPick);
                ChoiceState::Incorrect
            } else {
                ChoiceState::Idle
            };

            ChoiceView {
                label: option_label(idx),
                comment_id: option.comment_id.clone(),
                text: option.text.clone(),
                state,
                disabled: true,
                badges,
                likes: revealed.map(|r| format_compact(r.likes)),
            }
        })
        .collect()
}

fn text_of(round: &Round, id: &CommentId) -> String {
    round
        .option(id)
        .map(|option| option.text.clone())
        .unwrap_or_else(|| id.to_string())
}

fn draft_board(round: &Round, draft: &RankingDraft) -> RankingBoardView {
    RankingBoardView {
        current: draft.current().map(|id| text_of(round, id)),
        remaining: draft.remaining(),
        slots: draft
            .slots()
            .iter()
            .enumerate()
            .map(|(idx, slot)| SlotView {
                rank: idx + 1,
                text: slot.as_ref().map(|id| text_of(round, id)),
            })
            .collect(),
    }
}

fn locked_board(round: &Round, order: &[CommentId]) -> RankingBoardView {
    RankingBoardView {
        current: None,
        remaining: 0,
        slots: order
            .iter()
            .enumerate()
            .map(|(idx, id)| SlotView {
                rank: idx + 1,
                text: Some(text_of(round, id)),
            })
            .collect(),
    }
}

fn report(result: &RankingResult) -> RankingReportView {
    RankingReportView {
        score: result.score,
        rows: result
            .rows()
            .into_iter()
            .map(|row| ReportRowView {
                actual_rank: row.actual_rank,
                likes: format_grouped(row.comment.likes),
                text: row.comment.text,
                user_rank: row.user_rank,
                deviation: row.deviation.label(),
                severe: row.deviation.is_severe(),
            })
            .collect(),
    }
}
