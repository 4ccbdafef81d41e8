use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::derivation::VariableDerivationEngine;
use crate::discount::DiscountCalculator;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::facts::{FinalizationFacts, RawTransactionFacts};
use crate::risk::{RiskAssessment, RiskDecision, RiskDecisionGate};
use crate::settlement::settlement_model::{
    Receipt, SettlementRecord, SubmissionOutcome, SubmissionResponse,
};
use crate::settlement::settlement_traits::SettlementRepositoryTrait;

/// Orchestrates one submission end to end.
///
/// Order matters: validation, then replay, then risk, then pricing and
/// derivation, then the atomic insert. A blocked submission writes nothing,
/// so a later retry of the same key is assessed again rather than replayed.
#[derive(Clone)]
pub struct SettlementPipeline {
    repository: Arc<dyn SettlementRepositoryTrait>,
    calculator: DiscountCalculator,
    engine: VariableDerivationEngine,
    risk_gate: RiskDecisionGate,
    /// Submissions parked on a strong-auth challenge, keyed by challenge
    /// ref. Process-local: a parked challenge does not survive a restart,
    /// and the terminal simply resubmits under the same idempotency key.
    pending_challenges: Arc<DashMap<Uuid, (RawTransactionFacts, RiskAssessment)>>,
}

impl SettlementPipeline {
    pub fn new(
        repository: Arc<dyn SettlementRepositoryTrait>,
        calculator: DiscountCalculator,
        engine: VariableDerivationEngine,
        risk_gate: RiskDecisionGate,
    ) -> Self {
        Self {
            repository,
            calculator,
            engine,
            risk_gate,
            pending_challenges: Arc::new(DashMap::new()),
        }
    }

    /// Accepts one point-of-sale submission.
    ///
    /// Once past validation and replay the submission runs as its own task,
    /// so a caller that disconnects while the risk call is in flight cannot
    /// abandon it: the assessment and the settlement write still complete.
    pub async fn submit(&self, facts: RawTransactionFacts) -> Result<SubmissionResponse> {
        facts.validate()?;

        if let Some(existing) = self.repository.find_by_key(&facts.idempotency_key)? {
            log::debug!("Replaying stored result for key {}", facts.idempotency_key);
            return Ok(respond(&existing, true));
        }

        let this = self.clone();
        tokio::spawn(async move { this.assess_and_settle(facts).await })
            .await
            .map_err(|join| Error::Unexpected(format!("settlement task failed: {join}")))?
    }

    async fn assess_and_settle(&self, facts: RawTransactionFacts) -> Result<SubmissionResponse> {
        let assessment = self.risk_gate.assess(&facts).await;
        match assessment.decision {
            RiskDecision::Block => {
                log::warn!(
                    "Submission {} blocked by risk gate (score {})",
                    facts.idempotency_key,
                    assessment.score
                );
                Ok(SubmissionResponse {
                    outcome: SubmissionOutcome::Blocked {
                        reason: assessment.reason,
                        score: assessment.score,
                    },
                    replayed: false,
                })
            }
            RiskDecision::RequireStrongAuth => {
                let challenge = assessment.challenge.clone().ok_or_else(|| {
                    Error::Unexpected(
                        "strong-auth decision without a challenge descriptor".to_string(),
                    )
                })?;
                self.pending_challenges
                    .insert(challenge.challenge_ref, (facts, assessment));
                Ok(SubmissionResponse {
                    outcome: SubmissionOutcome::ChallengeRequired { challenge },
                    replayed: false,
                })
            }
            RiskDecision::Proceed | RiskDecision::ProceedFlagged => {
                self.settle(facts, assessment).await
            }
        }
    }

    /// Resumes a submission parked on a strong-auth challenge.
    ///
    /// The original facts and risk metadata are reused, so the settled
    /// record reflects the assessment that requested the challenge.
    pub async fn complete_challenge(&self, challenge_ref: Uuid) -> Result<SubmissionResponse> {
        let (_, (facts, mut assessment)) =
            self.pending_challenges.remove(&challenge_ref).ok_or_else(|| {
                ValidationError::InvalidInput(format!(
                    "unknown or already completed challenge {}",
                    challenge_ref
                ))
            })?;
        assessment.decision = RiskDecision::ProceedFlagged;
        assessment.reason = format!("challenge {} completed", challenge_ref);
        self.settle(facts, assessment).await
    }

    /// Merges newly reconciled amounts into a settled record.
    ///
    /// Re-derivation runs over the stored facts and the stored pricing,
    /// never a fresh rate lookup, so the result is reproducible even after
    /// the store's rate table has changed.
    pub async fn finalize(
        &self,
        idempotency_key: &str,
        update: &FinalizationFacts,
    ) -> Result<SettlementRecord> {
        let record = self
            .repository
            .find_by_key(idempotency_key)?
            .ok_or_else(|| {
                DatabaseError::NotFound(format!("no settlement for key {}", idempotency_key))
            })?;

        let mut finalization = record.finalization.clone();
        finalization.merge(update);
        let derived = self
            .engine
            .derive(&record.facts, &record.pricing, &finalization);
        self.repository
            .store_finalization(idempotency_key, finalization, derived)
            .await
    }

    async fn settle(
        &self,
        facts: RawTransactionFacts,
        assessment: RiskAssessment,
    ) -> Result<SubmissionResponse> {
        let pricing = self.calculator.price(&facts)?;
        let finalization = FinalizationFacts::default();
        let derived = self.engine.derive(&facts, &pricing, &finalization);

        let record = SettlementRecord {
            idempotency_key: facts.idempotency_key.clone(),
            facts,
            pricing,
            derived,
            risk: assessment,
            created_at: Utc::now(),
            finalization,
        };

        let (stored, inserted) = self.repository.insert_or_fetch(record).await?;
        if !inserted {
            // Lost an insert race against a concurrent retry; the winner's
            // record is authoritative.
            log::debug!(
                "Concurrent submission won key {}, replaying its result",
                stored.idempotency_key
            );
        }
        Ok(respond(&stored, !inserted))
    }
}

fn respond(record: &SettlementRecord, replayed: bool) -> SubmissionResponse {
    SubmissionResponse {
        outcome: SubmissionOutcome::Settled {
            receipt: Receipt::from_record(record),
        },
        replayed,
    }
}
