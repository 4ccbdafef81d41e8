use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::constants::{DEFAULT_RISK_TIMEOUT_SECS, FALLBACK_RISK_SCORE};
use crate::facts::RawTransactionFacts;
use crate::risk::risk_client::RiskScoringClientTrait;
use crate::risk::risk_model::{
    ChallengeDescriptor, RiskAssessment, RiskDecision, RiskRequest,
};

/// Configuration of the risk gate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskGateConfig {
    /// Kill switch: a disabled gate approves everything with score 0.
    pub enabled: bool,
    pub timeout_secs: u64,
}

impl Default for RiskGateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: DEFAULT_RISK_TIMEOUT_SECS,
        }
    }
}

/// Assesses submissions against the external scoring service.
///
/// Availability wins over strictness: when the service cannot answer, the
/// gate proceeds with a neutral score and marks the assessment as a
/// fallback. Blocking a sale because the scoring service is down is never
/// acceptable; the fallback flag keeps the degradation auditable.
#[derive(Clone)]
pub struct RiskDecisionGate {
    client: Arc<dyn RiskScoringClientTrait>,
    config: RiskGateConfig,
}

impl RiskDecisionGate {
    pub fn new(client: Arc<dyn RiskScoringClientTrait>, config: RiskGateConfig) -> Self {
        Self { client, config }
    }

    /// Never returns an error: every failure mode maps to a decision.
    pub async fn assess(&self, facts: &RawTransactionFacts) -> RiskAssessment {
        if !self.config.enabled {
            return RiskAssessment {
                decision: RiskDecision::Proceed,
                score: 0,
                reason: "risk gate disabled".to_string(),
                fallback: false,
                challenge: None,
            };
        }

        let request = RiskRequest::from_facts(facts);
        match self.client.score(&request).await {
            Ok(response) => self.map_response(facts, response),
            Err(err) => {
                log::warn!(
                    "Risk scoring unavailable for key {}, failing open: {}",
                    facts.idempotency_key,
                    err
                );
                RiskAssessment {
                    decision: RiskDecision::Proceed,
                    score: FALLBACK_RISK_SCORE,
                    reason: err.to_string(),
                    fallback: true,
                    challenge: None,
                }
            }
        }
    }

    fn map_response(
        &self,
        facts: &RawTransactionFacts,
        response: crate::risk::risk_model::ScoreResponse,
    ) -> RiskAssessment {
        let (decision, challenge) = match response.decision.as_str() {
            "APPROVED" => (RiskDecision::Proceed, None),
            "REVIEW" => (RiskDecision::ProceedFlagged, None),
            "DECLINED" => (RiskDecision::Block, None),
            "CHALLENGE" => (
                RiskDecision::RequireStrongAuth,
                Some(ChallengeDescriptor {
                    challenge_ref: Uuid::new_v4(),
                    method: response
                        .challenge_method
                        .clone()
                        .unwrap_or_else(|| "3DS".to_string()),
                }),
            ),
            other => {
                // An unknown decision string is a contract drift, treated
                // like an unavailable service.
                log::warn!(
                    "Unknown risk decision '{}' for key {}, failing open",
                    other,
                    facts.idempotency_key
                );
                return RiskAssessment {
                    decision: RiskDecision::Proceed,
                    score: FALLBACK_RISK_SCORE,
                    reason: format!("unknown decision '{}'", other),
                    fallback: true,
                    challenge: None,
                };
            }
        };

        RiskAssessment {
            decision,
            score: response.score,
            reason: response.reason,
            fallback: false,
            challenge,
        }
    }
}
