use serde::{Deserialize, Serialize};

use crate::domain::{CommentId, CommentOption, RankedComment, RankingResult, Round, RoundId};

/// `GET /api/daily-challenge`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallengeResponse {
    pub round_id: String,
    pub video_link: String,
    #[serde(default)]
    pub theme: Option<String>,
    pub comments: Vec<RankingCommentDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingCommentDto {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
}

/// `POST /api/submit-rank` body.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRankRequest {
    pub round_id: String,
    pub user_ranking: Vec<String>,
}

/// `POST /api/submit-rank` success body.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResultResponse {
    pub score: u32,
    pub user_ranking: Vec<String>,
    pub correct_ranking: Vec<RankingCommentDto>,
}

impl From<DailyChallengeResponse> for Round {
    fn from(dto: DailyChallengeResponse) -> Self {
        Round {
            round_id: RoundId::new(dto.round_id),
            video_link: dto.video_link,
            theme: dto.theme,
            options: dto
                .comments
                .into_iter()
                .map(|c| CommentOption {
                    comment_id: CommentId::new(c.id),
                    text: c.text,
                })
                .collect(),
        }
    }
}

impl From<RankingResultResponse> for RankingResult {
    fn from(dto: RankingResultResponse) -> Self {
        RankingResult {
            score: dto.score.min(100),
            user_ranking: dto.user_ranking.into_iter().map(CommentId::new).collect(),
            correct_ranking: dto
                .correct_ranking
                .into_iter()
                .map(|c| RankedComment {
                    id: CommentId::new(c.id),
                    text: c.text,
                    likes: c.likes.unwrap_or(0),
                })
                .collect(),
        }
    }
}
