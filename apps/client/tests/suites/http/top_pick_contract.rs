use client_test_support::{FakeBackend, ScriptedResponse};
use comment_guesser::domain::{CommentId, Guess, GuessMode, Reveal, RoundId};
use comment_guesser::error::Operation;
use comment_guesser::{ApiConfig, ApiError, GameApi, HttpGameApi};
use serde_json::json;

use crate::support::fixtures::{guess_result_json, round_json, IDS};

const ROUND: &str = "/api/get-game-round";
const SUBMIT: &str = "/api/submit-guess";

fn client(backend: &FakeBackend) -> Result<HttpGameApi, Box<dyn std::error::Error>> {
    let config = ApiConfig::new(&format!("{}/", backend.base_url()), GuessMode::TopPick)?;
    Ok(HttpGameApi::new(&config)?)
}

#[tokio::test]
async fn fetches_and_decodes_a_round() -> Result<(), Box<dyn std::error::Error>> {
    let backend = FakeBackend::start().await?;
    backend.enqueue(ROUND, ScriptedResponse::ok(round_json("r1")));
    let api = client(&backend)?;

    let round = api.fetch_round().await?;

    assert_eq!(round.round_id, RoundId::new("r1"));
    assert_eq!(round.options.len(), IDS.len());
    assert_eq!(round.options[2].comment_id, CommentId::new("c"));
    assert_eq!(round.video_id().as_deref(), Some("abc123"));

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, ROUND);
    backend.stop().await;
    Ok(())
}

#[tokio::test]
async fn submits_round_and_comment_ids() -> Result<(), Box<dyn std::error::Error>> {
    let backend = FakeBackend::start().await?;
    backend.enqueue(SUBMIT, ScriptedResponse::ok(guess_result_json("a")));
    let api = client(&backend)?;

    let reveal = api
        .submit_guess(&RoundId::new("r1"), &Guess::TopPick(CommentId::new("a")))
        .await?;

    let Reveal::TopPick(result) = reveal else {
        panic!("expected a top-pick reveal");
    };
    assert!(!result.is_correct);
    assert_eq!(result.selected_option_id, CommentId::new("a"));
    assert_eq!(result.selected_rank(), Some(2));

    let requests = backend.requests();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].body, json!({ "roundId": "r1", "commentId": "a" }));
    backend.stop().await;
    Ok(())
}

#[tokio::test]
async fn non_success_carries_server_detail() -> Result<(), Box<dyn std::error::Error>> {
    let backend = FakeBackend::start().await?;
    backend.enqueue(
        SUBMIT,
        ScriptedResponse::json(404, json!({ "detail": "Round not found or has expired." })),
    );
    let api = client(&backend)?;

    let err = api
        .submit_guess(&RoundId::new("gone"), &Guess::TopPick(CommentId::new("a")))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 404, .. }));
    assert_eq!(
        err.user_message(Operation::SubmitGuess),
        "Round not found or has expired."
    );
    backend.stop().await;
    Ok(())
}

#[tokio::test]
async fn structured_detail_falls_back_to_fixed_message() -> Result<(), Box<dyn std::error::Error>> {
    let backend = FakeBackend::start().await?;
    backend.enqueue(
        ROUND,
        ScriptedResponse::json(422, json!({ "detail": [{ "msg": "field required" }] })),
    );
    let api = client(&backend)?;

    let err = api.fetch_round().await.unwrap_err();

    assert_eq!(err.detail(), None);
    assert_eq!(
        err.user_message(Operation::FetchRound),
        Operation::FetchRound.fallback_message()
    );
    backend.stop().await;
    Ok(())
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() -> Result<(), Box<dyn std::error::Error>> {
    let backend = FakeBackend::start().await?;
    backend.enqueue(ROUND, ScriptedResponse::raw(200, "<html>oops</html>"));
    backend.enqueue(ROUND, ScriptedResponse::ok(json!({ "roundId": "r1" })));
    let api = client(&backend)?;

    assert!(matches!(api.fetch_round().await, Err(ApiError::Parse(_))));
    assert!(matches!(api.fetch_round().await, Err(ApiError::Parse(_))));
    backend.stop().await;
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() -> Result<(), Box<dyn std::error::Error>> {
    let backend = FakeBackend::start().await?;
    let api = client(&backend)?;
    backend.stop().await;

    let err = api.fetch_round().await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
    assert_eq!(
        err.user_message(Operation::FetchRound),
        "Unable to fetch a new video right now. Please try again soon."
    );
    Ok(())
}
