use crate::domain::reveal::{GuessResult, RevealedOption};
use crate::domain::round::CommentId;
use crate::domain::scoring::{
    rank_of, round_score, score_top_pick, time_left_bucket, PlaybackSnapshot, Scoreboard,
};

fn revealed(likes: &[(&str, u64)]) -> Vec<RevealedOption> {
    let top = likes.iter().map(|(_, l)| *l).max().unwrap_or(0);
    likes
        .iter()
        .map(|(id, l)| RevealedOption {
            comment_id: CommentId::new(*id),
            text: format!("comment {id}"),
            likes: *l,
            is_correct: *l == top,
        })
        .collect()
}

fn guess_result(selected: &str, likes: &[(&str, u64)]) -> GuessResult {
    let options = revealed(likes);
    let is_correct = options
        .iter()
        .any(|o| o.is_correct && o.comment_id.as_str() == selected);
    GuessResult {
        is_correct,
        selected_option_id: CommentId::new(selected),
        options,
    }
}

const FIVE: [(&str, u64); 5] = [("A", 50), ("B", 30), ("C", 80), ("D", 10), ("E", 20)];

#[test]
fn rank_sorts_by_likes_descending() {
    let options = revealed(&FIVE);
    assert_eq!(rank_of(&options, &"C".into()), Some(1));
    assert_eq!(rank_of(&options, &"A".into()), Some(2));
    assert_eq!(rank_of(&options, &"D".into()), Some(5));
    assert_eq!(rank_of(&options, &"Z".into()), None);
}

#[test]
fn rank_ties_keep_display_order() {
    let options = revealed(&[("x", 10), ("y", 40), ("z", 40)]);
    assert_eq!(rank_of(&options, &"y".into()), Some(1));
    assert_eq!(rank_of(&options, &"z".into()), Some(2));
}

#[test]
fn bucket_rewards_remaining_time() {
    assert_eq!(time_left_bucket(60.0, 0.0), 10);
    assert_eq!(time_left_bucket(60.0, 30.0), 5);
    assert_eq!(time_left_bucket(60.0, 59.0), 0);
    assert_eq!(time_left_bucket(60.0, 60.0), 0);
    assert_eq!(time_left_bucket(60.0, 75.0), 0);
    assert_eq!(time_left_bucket(0.0, 0.0), 10);
}

#[test]
fn unavailable_player_counts_as_full_time() {
    assert_eq!(PlaybackSnapshot::unavailable().time_left_bucket(), 10);
    assert_eq!(PlaybackSnapshot::new(f64::NAN, 3.0).time_left_bucket(), 10);
    assert_eq!(PlaybackSnapshot::new(-5.0, 1.0).time_left_bucket(), 10);
}

#[test]
fn streak_of_two_with_half_time_left_scores_880() {
    assert_eq!(round_score(3, 5), 880);

    let mut board = Scoreboard::new();
    board.apply_top_pick(true, 0);
    board.apply_top_pick(true, 0);
    assert_eq!(board.streak(), 2);
    let before = board.score();

    let result = guess_result("C", &FIVE);
    let outcome = score_top_pick(&mut board, &result, PlaybackSnapshot::new(60.0, 30.0));

    assert!(outcome.is_top);
    assert_eq!(outcome.rank, Some(1));
    assert_eq!(outcome.time_left_bucket, 5);
    assert_eq!(outcome.round_score, 880);
    assert_eq!(board.streak(), 3);
    assert_eq!(board.score(), before + 880);
    assert_eq!(board.last_round_score(), Some(880));
}

#[test]
fn non_top_guess_wipes_streak_and_score() {
    let mut board = Scoreboard::new();
    for _ in 0..4 {
        board.apply_top_pick(true, 10);
    }
    assert!(board.score() > 0);

    let result = guess_result("A", &FIVE);
    let outcome = score_top_pick(&mut board, &result, PlaybackSnapshot::new(60.0, 1.0));

    assert!(!outcome.is_top);
    assert_eq!(outcome.rank, Some(2));
    assert_eq!(outcome.round_score, 0);
    assert_eq!(board.streak(), 0);
    assert_eq!(board.score(), 0);
    assert_eq!(board.last_round_score(), Some(0));
}

#[test]
fn first_correct_guess_with_full_time() {
    let mut board = Scoreboard::new();
    assert_eq!(board.last_round_score(), None);
    // round(100 * (1.1 * 1 + 1.1 * 10)) = 1210
    assert_eq!(board.apply_top_pick(true, 10), 1210);
    assert_eq!(board.score(), 1210);
}

#[test]
fn ranking_only_records_last_round_score() {
    let mut board = Scoreboard::new();
    board.apply_top_pick(true, 2);
    let (streak, score) = (board.streak(), board.score());

    board.record_ranking(75);
    assert_eq!(board.streak(), streak);
    assert_eq!(board.score(), score);
    assert_eq!(board.last_round_score(), Some(75));
}

#[test]
fn reset_clears_everything() {
    let mut board = Scoreboard::new();
    board.apply_top_pick(true, 3);
    board.reset();
    assert_eq!(board, Scoreboard::default());
}
