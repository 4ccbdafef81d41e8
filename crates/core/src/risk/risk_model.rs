use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::facts::RawTransactionFacts;

/// Outcome of the risk gate for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskDecision {
    Proceed,
    ProceedFlagged,
    Block,
    RequireStrongAuth,
}

/// Reference handed back to the caller when strong authentication is
/// required; the challenge callback quotes it to resume the submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDescriptor {
    pub challenge_ref: Uuid,
    pub method: String,
}

/// Full result of assessing a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub decision: RiskDecision,
    /// 0 (no risk) to 100 (certain fraud). 50 is the neutral fallback.
    pub score: u8,
    pub reason: String,
    /// True when the scoring service was unreachable and the gate failed
    /// open instead of deciding.
    pub fallback: bool,
    pub challenge: Option<ChallengeDescriptor>,
}

/// Payload sent to the external scoring service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRequest {
    pub idempotency_key: String,
    pub store_id: String,
    pub terminal_serial: String,
    pub payment_method: String,
    pub installment_count: u32,
    pub gross_amount: Decimal,
    pub card_brand: Option<String>,
    pub customer_document: Option<String>,
}

impl RiskRequest {
    pub fn from_facts(facts: &RawTransactionFacts) -> Self {
        Self {
            idempotency_key: facts.idempotency_key.clone(),
            store_id: facts.store_id.clone(),
            terminal_serial: facts.terminal_serial.clone(),
            payment_method: facts.payment_method.as_str().to_string(),
            installment_count: facts.installment_count,
            gross_amount: facts.gross_amount,
            card_brand: facts.card_brand.clone(),
            customer_document: facts.customer_document.clone(),
        }
    }
}

/// Wire shape returned by the scoring service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    /// One of `APPROVED`, `REVIEW`, `DECLINED`, `CHALLENGE`.
    pub decision: String,
    pub score: u8,
    #[serde(default)]
    pub reason: String,
    /// Challenge method, present when `decision` is `CHALLENGE`.
    #[serde(default)]
    pub challenge_method: Option<String>,
}
