use client_test_support::{FakeBackend, ScriptedResponse};
use comment_guesser::domain::{CommentId, Deviation, Guess, GuessMode, Reveal, RoundId};
use comment_guesser::{ApiConfig, GameApi, HttpGameApi};
use serde_json::json;

use crate::support::fixtures::{daily_challenge_json, rank_result_json};

fn client(backend: &FakeBackend) -> Result<HttpGameApi, Box<dyn std::error::Error>> {
    let config = ApiConfig::new(&backend.base_url(), GuessMode::Ranking)?;
    Ok(HttpGameApi::new(&config)?)
}

#[tokio::test]
async fn daily_challenge_becomes_a_round() -> Result<(), Box<dyn std::error::Error>> {
    let backend = FakeBackend::start().await?;
    backend.enqueue(
        "/api/daily-challenge",
        ScriptedResponse::ok(daily_challenge_json("daily-7")),
    );
    let api = client(&backend)?;

    let round = api.fetch_round().await?;

    assert_eq!(round.round_id, RoundId::new("daily-7"));
    assert_eq!(round.theme.as_deref(), Some("Kitchen disasters"));
    assert_eq!(round.video_id().as_deref(), Some("xyz789"));
    assert_eq!(round.options.len(), 5);
    assert_eq!(backend.request_count("/api/get-game-round"), 0);
    backend.stop().await;
    Ok(())
}

#[tokio::test]
async fn submit_rank_posts_full_ordering() -> Result<(), Box<dyn std::error::Error>> {
    let backend = FakeBackend::start().await?;
    let user = ["c", "a", "b", "d", "e"];
    backend.enqueue("/api/submit-rank", ScriptedResponse::ok(rank_result_json(&user, 90)));
    let api = client(&backend)?;

    let guess = Guess::Ranking(user.iter().map(|id| CommentId::new(*id)).collect());
    let reveal = api.submit_guess(&RoundId::new("daily-7"), &guess).await?;

    let Reveal::Ranking(result) = reveal else {
        panic!("expected a ranking reveal");
    };
    assert_eq!(result.score, 90);
    let rows = result.rows();
    assert_eq!(rows[3].comment.id, CommentId::new("e"));
    assert_eq!(rows[3].deviation, Deviation::Off(1));
    assert_eq!(rows[4].deviation, Deviation::Off(-1));
    assert!(rows[..3].iter().all(|row| row.deviation == Deviation::Perfect));

    let requests = backend.requests();
    assert_eq!(requests[0].path, "/api/submit-rank");
    assert_eq!(
        requests[0].body,
        json!({ "roundId": "daily-7", "userRanking": ["c", "a", "b", "d", "e"] })
    );
    assert_eq!(backend.request_count("/api/submit-guess"), 0);
    backend.stop().await;
    Ok(())
}
