//! reqwest-backed implementation of [`GameApi`].

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ApiConfig, Endpoints};
use crate::domain::{Guess, GuessMode, Reveal, Round, RoundId};
use crate::error::ApiError;
use crate::protocol::ranking::{DailyChallengeResponse, RankingResultResponse, SubmitRankRequest};
use crate::protocol::top_pick::{GameRoundResponse, GuessResultResponse, SubmitGuessRequest};
use crate::protocol::ErrorBody;
use crate::services::game_api::GameApi;

#[derive(Debug, Clone)]
pub struct HttpGameApi {
    client: Client,
    endpoints: Endpoints,
    mode: GuessMode,
}

impl HttpGameApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            endpoints: config.endpoints(),
            mode: config.mode,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        decode(url, response).await
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        decode(url, response).await
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn fetch_round(&self) -> Result<Round, ApiError> {
        let url = self.endpoints.round.as_str();
        match self.mode {
            GuessMode::TopPick => self.get_json::<GameRoundResponse>(url).await.map(Round::from),
            GuessMode::Ranking => self
                .get_json::<DailyChallengeResponse>(url)
                .await
                .map(Round::from),
        }
    }

    async fn submit_guess(&self, round_id: &RoundId, guess: &Guess) -> Result<Reveal, ApiError> {
        match guess {
            Guess::TopPick(comment_id) => {
                let body = SubmitGuessRequest {
                    round_id: round_id.as_str().to_owned(),
                    comment_id: comment_id.as_str().to_owned(),
                };
                self.post_json::<_, GuessResultResponse>(&self.endpoints.submit_guess, &body)
                    .await
                    .map(|dto| Reveal::TopPick(dto.into()))
            }
            Guess::Ranking(ids) => {
                let body = SubmitRankRequest {
                    round_id: round_id.as_str().to_owned(),
                    user_ranking: ids.iter().map(|id| id.as_str().to_owned()).collect(),
                };
                self.post_json::<_, RankingResultResponse>(&self.endpoints.submit_rank, &body)
                    .await
                    .map(|dto| Reveal::Ranking(dto.into()))
            }
        }
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    let decoded = decode_body(status, &body);
    if let Err(ref err) = decoded {
        warn!(url, status = status.as_u16(), error = %err, "Backend call failed");
    }
    decoded
}

/// Turn a status and raw body into a typed result.
///
/// Non-2xx responses become [`ApiError::Http`] carrying the server `detail`
/// when the body has one; malformed 2xx bodies become [`ApiError::Parse`].
pub fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ApiError> {
    if !status.is_success() {
        let detail = ErrorBody::parse(body).into_detail();
        return Err(ApiError::http(status.as_u16(), detail));
    }
    Ok(serde_json::from_slice(body)?)
}
