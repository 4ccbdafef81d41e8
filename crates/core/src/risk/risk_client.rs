use std::time::Duration;

use async_trait::async_trait;

use crate::risk::risk_errors::RiskError;
use crate::risk::risk_model::{RiskRequest, ScoreResponse};

/// Trait for the external fraud-scoring collaborator.
#[async_trait]
pub trait RiskScoringClientTrait: Send + Sync {
    async fn score(&self, request: &RiskRequest) -> Result<ScoreResponse, RiskError>;
}

/// HTTP implementation of the scoring client.
///
/// The timeout is enforced on the client itself, so a hung service can
/// never hold a point-of-sale submission longer than the configured bound.
pub struct HttpRiskClient {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpRiskClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, RiskError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RiskError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            timeout_secs,
        })
    }
}

#[async_trait]
impl RiskScoringClientTrait for HttpRiskClient {
    async fn score(&self, request: &RiskRequest) -> Result<ScoreResponse, RiskError> {
        let url = format!("{}/v1/score", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RiskError::Timeout(self.timeout_secs)
                } else {
                    RiskError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RiskError::Status(status.as_u16()));
        }

        response
            .json::<ScoreResponse>()
            .await
            .map_err(|e| RiskError::MalformedResponse(e.to_string()))
    }
}
