use std::time::Duration;

use comment_guesser::domain::{GuessMode, Phase};
use comment_guesser::ui::terminal::{render, Reaction, Session};
use comment_guesser::ui::view::ChoiceState;
use comment_guesser::ui::{parse_command, Command};
use comment_guesser::{ApiError, RoundController, Transition};

use crate::support::fixtures::{round, top_pick_reveal};
use crate::support::scripted_api::ScriptedApi;

fn command(line: &str) -> Command {
    parse_command(line).expect("valid command")
}

async fn run(session: &mut Session, reaction: Reaction) -> Transition {
    match reaction {
        Reaction::Start(work) => {
            let completion = work.into_future().await;
            session.complete(completion)
        }
        _ => panic!("expected network work"),
    }
}

#[tokio::test]
async fn plays_a_round_from_typed_commands() {
    let api = ScriptedApi::new();
    api.push_round(Ok(round("r1")));
    api.push_reveal(Ok(top_pick_reveal("a")));
    api.push_round(Ok(round("r2")));
    let mut session = Session::new(RoundController::new(api.clone(), GuessMode::TopPick), None);

    let work = session.start().expect("initial fetch");
    let completion = work.into_future().await;
    assert_eq!(session.complete(completion), Transition::Applied);

    assert!(matches!(session.handle(command("a")), Reaction::Render));
    let view = session.view();
    assert_eq!(view.choices[0].state, ChoiceState::Selected);
    assert!(view.controls.submit_enabled);

    let reaction = session.handle(command("s"));
    assert!(session.controller().phase().is_submitting());
    assert!(session.view().is_busy());
    run(&mut session, reaction).await;

    let view = session.view();
    assert_eq!(view.choices[0].state, ChoiceState::Incorrect);
    assert_eq!(view.choices[2].state, ChoiceState::Correct);
    assert_eq!(view.scoreboard.last_round.as_deref(), Some("+0"));
    assert!(view.controls.next_enabled);

    let reaction = session.handle(command("n"));
    run(&mut session, reaction).await;
    assert!(matches!(session.controller().phase(), Phase::Ready { .. }));
}

#[tokio::test]
async fn refuses_out_of_turn_commands() {
    let api = ScriptedApi::new();
    api.push_round(Ok(round("r1")));
    let mut session = Session::new(RoundController::new(api.clone(), GuessMode::TopPick), None);
    let completion = session.start().unwrap().into_future().await;
    session.complete(completion);

    assert!(matches!(session.handle(command("s")), Reaction::Notice(_)));
    assert!(matches!(session.handle(command("n")), Reaction::Notice(_)));
    assert!(matches!(session.handle(command("r")), Reaction::Notice(_)));
    assert!(matches!(session.handle(command("3")), Reaction::Notice(_)));
    assert!(matches!(session.handle(command("h")), Reaction::Help));
    assert_eq!(api.submit_calls(), 0);
    assert_eq!(api.fetch_calls(), 1);
}

#[tokio::test]
async fn retry_after_failed_fetch() {
    let api = ScriptedApi::new();
    api.push_round(Err(ApiError::http(502, Some("Bad gateway".into()))));
    api.push_round(Ok(round("r2")));
    let mut session = Session::new(RoundController::new(api.clone(), GuessMode::TopPick), None);
    let completion = session.start().unwrap().into_future().await;
    session.complete(completion);

    let view = session.view();
    assert_eq!(view.error.as_deref(), Some("Bad gateway"));
    assert!(view.controls.retry_enabled);

    let reaction = session.handle(command("r"));
    run(&mut session, reaction).await;
    assert!(session.view().error.is_none());
    assert_eq!(session.view().choices.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn wall_clock_player_drives_the_time_bonus() {
    let api = ScriptedApi::new();
    api.push_round(Ok(round("r1")));
    api.push_reveal(Ok(top_pick_reveal("c")));
    let mut session = Session::new(
        RoundController::new(api.clone(), GuessMode::TopPick),
        Some(30.0),
    );
    let completion = session.start().unwrap().into_future().await;
    session.complete(completion);

    tokio::time::advance(Duration::from_secs(15)).await;
    session.handle(command("c"));
    let reaction = session.handle(command("s"));
    run(&mut session, reaction).await;

    match session.controller().phase() {
        Phase::Revealed {
            outcome: Some(outcome),
            ..
        } => {
            assert_eq!(outcome.time_left_bucket, 5);
            assert_eq!(outcome.round_score, 660);
        }
        other => panic!("expected scored reveal, got {other:?}"),
    }
}

#[tokio::test]
async fn quit_stops_the_session() {
    let api = ScriptedApi::new();
    let _gate = api.push_gated_round(Ok(round("r1")));
    let mut session = Session::new(RoundController::new(api.clone(), GuessMode::TopPick), None);
    let work = session.start().unwrap();

    assert!(matches!(session.handle(command("q")), Reaction::Quit));
    assert!(!session.controller().is_fetch_in_flight());
    let completion = work.into_future().await;
    assert_eq!(session.complete(completion), Transition::Ignored);
}

#[tokio::test]
async fn renders_reveal_with_badges_and_likes() {
    let api = ScriptedApi::new();
    api.push_round(Ok(round("r1")));
    api.push_reveal(Ok(top_pick_reveal("a")));
    let mut session = Session::new(RoundController::new(api.clone(), GuessMode::TopPick), None);
    let completion = session.start().unwrap().into_future().await;
    session.complete(completion);
    session.handle(command("a"));
    let reaction = session.handle(command("s"));
    run(&mut session, reaction).await;

    let mut out = Vec::new();
    render(&mut out, &session.view()).expect("render to memory");
    let text = String::from_utf8(out).expect("utf8");

    assert!(text.contains("Streak 0 | Score 0 (+0)"));
    assert!(text.contains("Video: https://www.youtube.com/embed/abc123?modestbranding=1&rel=0&playsinline=1"));
    assert!(text.contains("+ C. Comment C  [80 likes]  <Top comment>"));
    assert!(text.contains("x A. Comment A  [50 likes]  <Your pick>"));
    assert!(text.contains("[n: next video]"));
}
