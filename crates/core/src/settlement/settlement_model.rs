use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::derivation::{DerivedVariableSet, VarId};
use crate::discount::PricingResult;
use crate::facts::{FinalizationFacts, RawTransactionFacts};
use crate::risk::{ChallengeDescriptor, RiskAssessment};

/// The persisted outcome of one accepted submission.
///
/// Created exactly once per idempotency key and never mutated afterwards,
/// except to merge later finalization facts, which re-derives the variable
/// set from the stored facts and the stored pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRecord {
    pub idempotency_key: String,
    pub facts: RawTransactionFacts,
    pub pricing: PricingResult,
    pub derived: DerivedVariableSet,
    pub risk: RiskAssessment,
    pub created_at: DateTime<Utc>,
    pub finalization: FinalizationFacts,
}

/// Itemized receipt printed at the point of sale.
///
/// Every field is a finished display string rendered from the derived set,
/// so a replayed submission reproduces the original receipt byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub store_name: String,
    pub transaction_date: String,
    pub transaction_time: String,
    pub transaction_nsu: String,
    pub payment_method: String,
    pub gross_amount: String,
    pub net_amount: String,
    /// `"3x R$ 33,00"` for installment plans, empty otherwise.
    pub installment_line: String,
    /// `"(with discount)"`, `"(with surcharge)"` or empty.
    pub message: String,
    pub cashback_amount: String,
    pub cashback_payout_date: String,
}

impl Receipt {
    pub fn from_record(record: &SettlementRecord) -> Self {
        let derived = &record.derived;
        let installment_line = if record.facts.installment_count > 1 {
            format!(
                "{}x {}",
                derived.display(VarId::InstallmentCount),
                derived.display(VarId::InstallmentAmount)
            )
        } else {
            String::new()
        };
        Receipt {
            store_name: derived.display(VarId::StoreName),
            transaction_date: derived.display(VarId::TransactionDate),
            transaction_time: derived.display(VarId::TransactionTime),
            transaction_nsu: derived.display(VarId::TransactionNsu),
            payment_method: derived.display(VarId::PaymentMethodCode),
            gross_amount: derived.display(VarId::GrossAmount),
            net_amount: derived.display(VarId::NetAmount),
            installment_line,
            message: derived.display(VarId::ReceiptMessage),
            cashback_amount: derived.display(VarId::CashbackAmount),
            cashback_payout_date: derived.display(VarId::CashbackPayoutDate),
        }
    }
}

/// What the pipeline decided about a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionOutcome {
    Settled { receipt: Receipt },
    Blocked { reason: String, score: u8 },
    ChallengeRequired { challenge: ChallengeDescriptor },
}

/// Pipeline response, flagging whether a stored result was replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    #[serde(flatten)]
    pub outcome: SubmissionOutcome,
    pub replayed: bool,
}
