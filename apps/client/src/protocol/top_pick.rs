use serde::{Deserialize, Serialize};

use crate::domain::{CommentId, CommentOption, GuessResult, RevealedOption, Round, RoundId};

/// `GET /api/get-game-round`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRoundResponse {
    pub round_id: String,
    pub video_link: String,
    pub options: Vec<CommentOptionDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentOptionDto {
    pub comment_id: String,
    pub text: String,
}

/// `POST /api/submit-guess` body.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitGuessRequest {
    pub round_id: String,
    pub comment_id: String,
}

/// `POST /api/submit-guess` success body.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResultResponse {
    pub is_correct: bool,
    pub selected_option_id: String,
    pub options: Vec<RevealedOptionDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedOptionDto {
    pub comment_id: String,
    pub text: String,
    pub likes: u64,
    pub is_correct: bool,
}

impl From<GameRoundResponse> for Round {
    fn from(dto: GameRoundResponse) -> Self {
        Round {
            round_id: RoundId::new(dto.round_id),
            video_link: dto.video_link,
            theme: None,
            options: dto
                .options
                .into_iter()
                .map(|o| CommentOption {
                    comment_id: CommentId::new(o.comment_id),
                    text: o.text,
                })
                .collect(),
        }
    }
}

impl From<GuessResultResponse> for GuessResult {
    fn from(dto: GuessResultResponse) -> Self {
        GuessResult {
            is_correct: dto.is_correct,
            selected_option_id: CommentId::new(dto.selected_option_id),
            options: dto
                .options
                .into_iter()
                .map(|o| RevealedOption {
                    comment_id: CommentId::new(o.comment_id),
                    text: o.text,
                    likes: o.likes,
                    is_correct: o.is_correct,
                })
                .collect(),
        }
    }
}
