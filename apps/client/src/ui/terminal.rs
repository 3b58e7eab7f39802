//! Line-oriented terminal front-end.
//!
//! [`Session`] maps parsed commands onto the controller and hands back the
//! network work to run; the binary owns stdin and the event loop.

use std::io::{self, Write};

use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use crate::player::{ready_channel, WallClockPlayer};
use crate::services::round_flow::{
    FetchCompletion, GuessSubmission, RoundController, RoundFetch, SubmitCompletion, Transition,
};
use crate::ui::command::{Command, HELP};
use crate::ui::view::{ChoiceState, RankingBoardView, RankingReportView, VideoView, ViewState};

/// Network work started by a command.
pub enum Work {
    Fetch(RoundFetch),
    Submit(GuessSubmission),
}

impl Work {
    pub fn into_future(self) -> BoxFuture<'static, Completion> {
        match self {
            Self::Fetch(fetch) => fetch.run().map(Completion::Fetch).boxed(),
            Self::Submit(submission) => submission.run().map(Completion::Submit).boxed(),
        }
    }
}

#[derive(Debug)]
pub enum Completion {
    Fetch(FetchCompletion),
    Submit(SubmitCompletion),
}

/// What the event loop should do after a command.
pub enum Reaction {
    Render,
    Start(Work),
    Notice(&'static str),
    Help,
    Quit,
}

pub struct Session {
    controller: RoundController,
    /// Assumed video length for the wall-clock player.
    video_seconds: Option<f64>,
}

impl Session {
    pub fn new(controller: RoundController, video_seconds: Option<f64>) -> Self {
        Self {
            controller,
            video_seconds,
        }
    }

    pub fn controller(&self) -> &RoundController {
        &self.controller
    }

    pub fn view(&self) -> ViewState {
        self.controller.view()
    }

    pub fn start(&mut self) -> Option<Work> {
        self.controller.mount().map(Work::Fetch)
    }

    pub fn handle(&mut self, command: Command) -> Reaction {
        match command {
            Command::Select(label) => {
                if self.controller.select_label(&label) {
                    Reaction::Render
                } else {
                    Reaction::Notice("That option cannot be picked right now.")
                }
            }
            Command::Place(slot) => {
                if self.controller.place_in_slot(slot) {
                    Reaction::Render
                } else {
                    Reaction::Notice("That rank slot is not available.")
                }
            }
            Command::Submit => match self.controller.begin_submit() {
                Some(submission) => Reaction::Start(Work::Submit(submission)),
                None => Reaction::Notice("Nothing to lock in yet."),
            },
            Command::Next => match self.controller.next_round() {
                Some(fetch) => Reaction::Start(Work::Fetch(fetch)),
                None => Reaction::Notice("Finish this round first."),
            },
            Command::Retry => match self.controller.retry() {
                Some(fetch) => Reaction::Start(Work::Fetch(fetch)),
                None => Reaction::Notice("Nothing to retry."),
            },
            Command::ResetScore => {
                self.controller.reset_scoreboard();
                Reaction::Render
            }
            Command::Help => Reaction::Help,
            Command::Quit => {
                self.controller.unmount();
                Reaction::Quit
            }
        }
    }

    /// Apply finished work; a freshly loaded round gets a player.
    pub fn complete(&mut self, completion: Completion) -> Transition {
        match completion {
            Completion::Fetch(fetch) => {
                let transition = self.controller.complete_fetch(fetch);
                if transition.is_applied() {
                    self.attach_player();
                }
                transition
            }
            Completion::Submit(submit) => self.controller.complete_submit(submit),
        }
    }

    pub fn shutdown(&mut self) {
        self.controller.unmount();
    }

    fn attach_player(&mut self) {
        let Some(seconds) = self.video_seconds else {
            return;
        };
        let has_video = self
            .controller
            .phase()
            .round()
            .is_some_and(|round| round.video_id().is_some());
        if !has_video {
            return;
        }

        let (signal, ready) = ready_channel();
        if self
            .controller
            .attach_player(Box::new(WallClockPlayer::start(seconds)), ready)
        {
            signal.notify();
            debug!(seconds, "Wall-clock player started");
        }
    }
}

pub fn render_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{HELP}")
}

pub fn render<W: Write>(out: &mut W, view: &ViewState) -> io::Result<()> {
    writeln!(out)?;
    write!(
        out,
        "Streak {} | Score {}",
        view.scoreboard.streak, view.scoreboard.score
    )?;
    if let Some(delta) = &view.scoreboard.last_round {
        write!(out, " ({delta})")?;
    }
    writeln!(out)?;
    writeln!(out, "== {} ==", view.status)?;

    if let Some(error) = &view.error {
        writeln!(out, "{error}")?;
    }

    match &view.video {
        Some(VideoView::Embed { embed_url, .. }) => writeln!(out, "Video: {embed_url}")?,
        Some(VideoView::Unavailable) => writeln!(out, "Video unavailable")?,
        None => {}
    }
    if let Some(theme) = &view.theme {
        writeln!(out, "Theme: {theme}")?;
    }

    for choice in &view.choices {
        let marker = match choice.state {
            ChoiceState::Idle => ' ',
            ChoiceState::Selected => '>',
            ChoiceState::Correct => '+',
            ChoiceState::Incorrect => 'x',
        };
        write!(out, "{marker} {}. {}", choice.label, choice.text)?;
        if let Some(likes) = &choice.likes {
            write!(out, "  [{likes} likes]")?;
        }
        for badge in &choice.badges {
            write!(out, "  <{}>", badge.label())?;
        }
        writeln!(out)?;
    }

    if let Some(board) = &view.ranking {
        render_board(out, board)?;
    }
    if let Some(report) = &view.report {
        render_report(out, report)?;
    }

    let mut actions = Vec::new();
    if view.controls.submit_enabled {
        actions.push("s: lock in guess");
    }
    if view.controls.next_enabled {
        actions.push("n: next video");
    }
    if view.controls.retry_enabled {
        actions.push("r: try again");
    }
    if !actions.is_empty() {
        writeln!(out, "[{}]", actions.join("  "))?;
    }
    out.flush()
}

fn render_board<W: Write>(out: &mut W, board: &RankingBoardView) -> io::Result<()> {
    if let Some(current) = &board.current {
        writeln!(out, "Place: \"{current}\" ({} left)", board.remaining)?;
    }
    for slot in &board.slots {
        match &slot.text {
            Some(text) => writeln!(out, "  #{} {text}", slot.rank)?,
            None => writeln!(out, "  #{} ---", slot.rank)?,
        }
    }
    Ok(())
}

fn render_report<W: Write>(out: &mut W, report: &RankingReportView) -> io::Result<()> {
    writeln!(out, "Score: {}/100", report.score)?;
    for row in &report.rows {
        let yours = row
            .user_rank
            .map_or_else(|| "-".to_owned(), |rank| format!("#{rank}"));
        let flag = if row.severe { " !" } else { "" };
        writeln!(
            out,
            "  #{} {} ({} likes) you: {} [{}]{flag}",
            row.actual_rank, row.text, row.likes, yours, row.deviation
        )?;
    }
    Ok(())
}
