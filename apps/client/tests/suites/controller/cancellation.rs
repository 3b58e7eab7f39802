use std::time::Duration;

use comment_guesser::domain::{GuessMode, Phase, RoundId};
use comment_guesser::services::round_flow::FetchOutcome;
use comment_guesser::{ApiError, RoundController, Transition};

use crate::support::fixtures::round;
use crate::support::scripted_api::ScriptedApi;

fn round_id(controller: &RoundController) -> Option<RoundId> {
    controller.phase().round().map(|r| r.round_id.clone())
}

#[tokio::test]
async fn new_request_interrupts_an_in_flight_fetch() {
    let api = ScriptedApi::new();
    let _gate = api.push_gated_round(Ok(round("r1")));
    api.push_round(Ok(round("r2")));
    let mut controller = RoundController::new(api.clone(), GuessMode::TopPick);

    let first = tokio::spawn(controller.mount().unwrap().run());
    while api.fetch_calls() < 1 {
        tokio::task::yield_now().await;
    }

    let second = controller.request_round().unwrap();
    let first_done = tokio::time::timeout(Duration::from_secs(5), first)
        .await
        .expect("cancelled fetch returns promptly")
        .expect("fetch task");
    assert!(matches!(first_done.outcome(), FetchOutcome::Cancelled));
    assert_eq!(controller.complete_fetch(first_done), Transition::Ignored);
    assert!(controller.phase().is_loading());

    let second_done = second.run().await;
    assert_eq!(controller.complete_fetch(second_done), Transition::Applied);
    assert_eq!(round_id(&controller), Some(RoundId::new("r2")));
}

#[tokio::test]
async fn superseded_result_never_lands() {
    let api = ScriptedApi::new();
    api.push_round(Ok(round("r1")));
    api.push_round(Ok(round("r2")));
    let mut controller = RoundController::new(api.clone(), GuessMode::TopPick);

    let first_done = controller.mount().unwrap().run().await;
    assert!(matches!(first_done.outcome(), FetchOutcome::Loaded(_)));
    let second = controller.request_round().unwrap();

    assert_eq!(controller.complete_fetch(first_done), Transition::Ignored);
    assert!(controller.phase().is_loading());

    let second_done = second.run().await;
    controller.complete_fetch(second_done);
    assert_eq!(round_id(&controller), Some(RoundId::new("r2")));
}

#[tokio::test]
async fn superseded_failure_does_not_raise_an_error() {
    let api = ScriptedApi::new();
    api.push_round(Err(ApiError::network("late failure")));
    api.push_round(Ok(round("r2")));
    let mut controller = RoundController::new(api.clone(), GuessMode::TopPick);

    let first_done = controller.mount().unwrap().run().await;
    let second = controller.request_round().unwrap();
    assert_eq!(controller.complete_fetch(first_done), Transition::Ignored);
    assert_eq!(controller.phase().error_message(), None);

    let second_done = second.run().await;
    controller.complete_fetch(second_done);
    assert_eq!(round_id(&controller), Some(RoundId::new("r2")));
}

#[tokio::test]
async fn completion_after_unmount_is_ignored() {
    let api = ScriptedApi::new();
    api.push_round(Ok(round("r1")));
    let mut controller = RoundController::new(api.clone(), GuessMode::TopPick);

    let done = controller.mount().unwrap().run().await;
    controller.unmount();

    assert!(!controller.is_fetch_in_flight());
    assert_eq!(controller.complete_fetch(done), Transition::Ignored);
    assert_eq!(controller.phase(), &Phase::Loading);
}

#[tokio::test]
async fn fetch_started_after_cancellation_skips_the_network() {
    let api = ScriptedApi::new();
    api.push_round(Ok(round("r1")));
    let mut controller = RoundController::new(api.clone(), GuessMode::TopPick);

    let fetch = controller.mount().unwrap();
    controller.unmount();
    let done = fetch.run().await;

    assert!(matches!(done.outcome(), FetchOutcome::Cancelled));
    assert_eq!(api.fetch_calls(), 0);
}

#[tokio::test]
async fn dropping_the_controller_cancels_its_fetch() {
    let api = ScriptedApi::new();
    let _gate = api.push_gated_round(Ok(round("r1")));
    let mut controller = RoundController::new(api.clone(), GuessMode::TopPick);

    let fetch = tokio::spawn(controller.mount().unwrap().run());
    while api.fetch_calls() < 1 {
        tokio::task::yield_now().await;
    }
    drop(controller);

    let done = tokio::time::timeout(Duration::from_secs(5), fetch)
        .await
        .expect("cancelled fetch returns promptly")
        .expect("fetch task");
    assert!(matches!(done.outcome(), FetchOutcome::Cancelled));
}
