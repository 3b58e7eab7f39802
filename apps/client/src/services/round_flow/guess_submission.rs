use std::mem;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{RoundController, Transition};
use crate::domain::scoring::score_top_pick;
use crate::domain::{CommentId, Guess, Phase, Reveal, RoundId, Selection};
use crate::error::{ApiError, Operation};
use crate::services::game_api::GameApi;

/// A guess that has left `Ready` and is waiting to be posted.
pub struct GuessSubmission {
    api: Arc<dyn GameApi>,
    generation: u64,
    round_id: RoundId,
    guess: Guess,
}

impl GuessSubmission {
    pub fn guess(&self) -> &Guess {
        &self.guess
    }

    /// Post the guess. Submissions are not cancellable.
    pub async fn run(self) -> SubmitCompletion {
        let result = self.api.submit_guess(&self.round_id, &self.guess).await;
        SubmitCompletion {
            generation: self.generation,
            result,
        }
    }
}

#[derive(Debug)]
pub struct SubmitCompletion {
    generation: u64,
    result: Result<Reveal, ApiError>,
}

impl SubmitCompletion {
    pub fn result(&self) -> &Result<Reveal, ApiError> {
        &self.result
    }
}

impl RoundController {
    /// Make `comment_id` the pending top pick.
    ///
    /// Only possible while a top-pick round waits for a guess, and only for
    /// one of that round's options. Selecting again overwrites.
    pub fn select_option(&mut self, comment_id: &CommentId) -> bool {
        let Phase::Ready { round, selection } = &mut self.phase else {
            return false;
        };
        if !round.contains(comment_id) {
            debug!(comment_id = %comment_id, "Ignoring selection outside the round");
            return false;
        }
        match selection {
            Selection::TopPick(pick) => {
                *pick = Some(comment_id.clone());
                true
            }
            Selection::Ranking(_) => false,
        }
    }

    /// Select by display label (`A`, `B`, ...).
    pub fn select_label(&mut self, label: &str) -> bool {
        let id = self
            .phase
            .round()
            .and_then(|round| round.option_by_label(label))
            .map(|option| option.comment_id.clone());
        match id {
            Some(id) => self.select_option(&id),
            None => false,
        }
    }

    /// Drop the comment being ranked into the 0-based rank `slot`.
    pub fn place_in_slot(&mut self, slot: usize) -> bool {
        let Phase::Ready {
            selection: Selection::Ranking(draft),
            ..
        } = &mut self.phase
        else {
            return false;
        };
        draft.place(slot)
    }

    /// Leave `Ready` for `Submitting`.
    ///
    /// Returns `None`, without any network call, when there is no round, no
    /// complete guess, or the round is already revealed.
    pub fn begin_submit(&mut self) -> Option<GuessSubmission> {
        let phase = mem::replace(&mut self.phase, Phase::Idle);
        let (round, guess) = match phase {
            Phase::Ready { round, selection } => match selection.guess() {
                Some(guess) => (round, guess),
                None => {
                    self.phase = Phase::Ready { round, selection };
                    return None;
                }
            },
            other => {
                self.phase = other;
                return None;
            }
        };

        let round_id = round.round_id.clone();
        info!(round_id = %round_id, "Submitting guess");
        debug!(generation = self.generation, "Transition: Ready -> Submitting");
        self.phase = Phase::Submitting {
            round,
            guess: guess.clone(),
        };

        Some(GuessSubmission {
            api: Arc::clone(&self.api),
            generation: self.generation,
            round_id,
            guess,
        })
    }

    /// Apply the verdict, scoring top picks against the playback position.
    pub fn complete_submit(&mut self, completion: SubmitCompletion) -> Transition {
        if completion.generation != self.generation {
            debug!(
                generation = completion.generation,
                current = self.generation,
                "Discarding stale submission"
            );
            return Transition::Ignored;
        }

        let phase = mem::replace(&mut self.phase, Phase::Idle);
        let (round, guess) = match phase {
            Phase::Submitting { round, guess } => (round, guess),
            other => {
                self.phase = other;
                return Transition::Ignored;
            }
        };

        match completion.result {
            Ok(reveal) => {
                let outcome = match &reveal {
                    Reveal::TopPick(result) => {
                        let playback = self.player.snapshot();
                        Some(score_top_pick(&mut self.scoreboard, result, playback))
                    }
                    Reveal::Ranking(result) => {
                        self.scoreboard.record_ranking(result.score);
                        None
                    }
                };
                info!(
                    round_id = %round.round_id,
                    streak = self.scoreboard.streak(),
                    score = self.scoreboard.score(),
                    last_round_score = ?self.scoreboard.last_round_score(),
                    "Guess revealed"
                );
                self.phase = Phase::Revealed {
                    round,
                    guess,
                    reveal,
                    outcome,
                };
            }
            Err(err) => {
                let operation = Operation::SubmitGuess;
                warn!(
                    operation = operation.as_str(),
                    round_id = %round.round_id,
                    error = %err,
                    "Guess submission failed"
                );
                self.player.detach();
                self.phase = Phase::Error {
                    operation,
                    message: err.user_message(operation),
                };
            }
        }
        Transition::Applied
    }

    /// Begin, await and apply a submission in one go.
    pub async fn submit(&mut self) -> Transition {
        let Some(submission) = self.begin_submit() else {
            return Transition::Ignored;
        };
        let completion = submission.run().await;
        self.complete_submit(completion)
    }
}
