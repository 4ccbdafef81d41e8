//! End-to-end tests of the settlement pipeline: idempotent replay, risk
//! outcomes, challenge resume and finalization.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::derivation::{VarId, VariableDerivationEngine};
    use crate::discount::DiscountCalculator;
    use crate::errors::{DatabaseError, Error};
    use crate::facts::{FinalizationFacts, PaymentMethod, RawTransactionFacts};
    use crate::rates::{RateProgram, RateTableEntry, RateTableResolver};
    use crate::risk::{
        RiskDecisionGate, RiskError, RiskGateConfig, RiskRequest, RiskScoringClientTrait,
        ScoreResponse,
    };
    use crate::settlement::{SettlementPipeline, SettlementRepositoryTrait, SubmissionOutcome};
    use crate::storage::{InMemoryRateTableRepository, InMemorySettlementRepository};

    struct CannedClient {
        decision: Option<&'static str>,
    }

    /// Approves after a delay, long enough for a caller to give up first.
    struct SlowClient;

    #[async_trait]
    impl RiskScoringClientTrait for SlowClient {
        async fn score(&self, _request: &RiskRequest) -> Result<ScoreResponse, RiskError> {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok(ScoreResponse {
                decision: "APPROVED".to_string(),
                score: 42,
                reason: "scored".to_string(),
                challenge_method: None,
            })
        }
    }

    #[async_trait]
    impl RiskScoringClientTrait for CannedClient {
        async fn score(&self, _request: &RiskRequest) -> Result<ScoreResponse, RiskError> {
            match self.decision {
                Some(decision) => Ok(ScoreResponse {
                    decision: decision.to_string(),
                    score: 42,
                    reason: "scored".to_string(),
                    challenge_method: Some("3DS2".to_string()),
                }),
                None => Err(RiskError::Timeout(5)),
            }
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn standard_entry() -> RateTableEntry {
        RateTableEntry {
            id: "std".to_string(),
            store_id: "store-1".to_string(),
            program: RateProgram::Standard,
            payment_method: PaymentMethod::CreditInstallments,
            installments_from: 1,
            installments_to: 12,
            discount_rate: dec!(0.05),
            anticipation_rate: dec!(0.02),
            commission_rate: dec!(0.03),
            acquirer_cost_rate: dec!(0.015),
            partner_rate: dec!(0.01),
            tax_rate: dec!(0.0925),
            settlement_days: 30,
            valid_from: d(2024, 1, 1),
            valid_to: None,
        }
    }

    fn facts(key: &str) -> RawTransactionFacts {
        RawTransactionFacts {
            idempotency_key: key.to_string(),
            transaction_nsu: "000123".to_string(),
            acquirer_nsu: Some("A-99".to_string()),
            store_id: "store-1".to_string(),
            store_name: "Padaria Central".to_string(),
            channel_name: "POS".to_string(),
            terminal_serial: "SN-4455".to_string(),
            terminal_id: "T01".to_string(),
            transaction_date: d(2024, 6, 3),
            transaction_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            submitted_at: Utc.with_ymd_and_hms(2024, 6, 3, 17, 30, 5).unwrap(),
            payment_method: PaymentMethod::CreditInstallments,
            installment_count: 3,
            gross_amount: dec!(100.00),
            card_brand: Some("VISA".to_string()),
            customer_document: Some("12345678900".to_string()),
        }
    }

    fn pipeline(
        decision: Option<&'static str>,
    ) -> (SettlementPipeline, Arc<InMemorySettlementRepository>) {
        let rates = InMemoryRateTableRepository::with_entries(vec![standard_entry()]);
        let repository = Arc::new(InMemorySettlementRepository::new());
        let pipeline = SettlementPipeline::new(
            repository.clone(),
            DiscountCalculator::new(RateTableResolver::new(Arc::new(rates))),
            VariableDerivationEngine::new().unwrap(),
            RiskDecisionGate::new(
                Arc::new(CannedClient { decision }),
                RiskGateConfig::default(),
            ),
        );
        (pipeline, repository)
    }

    #[tokio::test]
    async fn test_submission_settles_and_prints_a_receipt() {
        let (pipeline, repository) = pipeline(Some("APPROVED"));
        let response = pipeline.submit(facts("k-1")).await.unwrap();

        assert!(!response.replayed);
        let receipt = match response.outcome {
            SubmissionOutcome::Settled { receipt } => receipt,
            other => panic!("unexpected outcome {:?}", other),
        };
        assert_eq!(receipt.gross_amount, "R$ 100,00");
        assert_eq!(receipt.net_amount, "R$ 99,00");
        assert_eq!(receipt.installment_line, "3x R$ 33,00");
        assert_eq!(receipt.message, "(with discount)");
        assert_eq!(receipt.store_name, "Padaria Central");
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_replay_returns_identical_receipt_without_new_record() {
        let (pipeline, repository) = pipeline(Some("APPROVED"));
        let first = pipeline.submit(facts("k-1")).await.unwrap();
        let second = pipeline.submit(facts("k-1")).await.unwrap();

        assert!(!first.replayed);
        assert!(second.replayed);
        assert_eq!(
            serde_json::to_string(&first.outcome).unwrap(),
            serde_json::to_string(&second.outcome).unwrap()
        );
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_facts_are_rejected_before_any_gate() {
        let (pipeline, repository) = pipeline(Some("APPROVED"));
        let mut bad = facts("k-1");
        bad.gross_amount = dec!(-5.00);
        let err = pipeline.submit(bad).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_blocked_submission_writes_no_record() {
        let (pipeline, repository) = pipeline(Some("DECLINED"));
        let response = pipeline.submit(facts("k-1")).await.unwrap();

        match response.outcome {
            SubmissionOutcome::Blocked { score, .. } => assert_eq!(score, 42),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_risk_outage_fails_open_and_still_settles() {
        let (pipeline, repository) = pipeline(None);
        let response = pipeline.submit(facts("k-1")).await.unwrap();

        assert!(matches!(
            response.outcome,
            SubmissionOutcome::Settled { .. }
        ));
        let record = repository.find_by_key("k-1").unwrap().unwrap();
        assert!(record.risk.fallback);
        assert_eq!(record.risk.score, 50);
    }

    #[tokio::test]
    async fn test_dropped_caller_does_not_abandon_an_in_flight_submission() {
        use std::time::Duration;

        let rates = InMemoryRateTableRepository::with_entries(vec![standard_entry()]);
        let repository = Arc::new(InMemorySettlementRepository::new());
        let pipeline = SettlementPipeline::new(
            repository.clone(),
            DiscountCalculator::new(RateTableResolver::new(Arc::new(rates))),
            VariableDerivationEngine::new().unwrap(),
            RiskDecisionGate::new(Arc::new(SlowClient), RiskGateConfig::default()),
        );

        // The caller disconnects while the risk call is still in flight.
        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), pipeline.submit(facts("k-1"))).await;
        assert!(abandoned.is_err());

        // The submission still completes and is recorded.
        let mut settled = false;
        for _ in 0..100 {
            if repository.len() == 1 {
                settled = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(settled);
        let record = repository.find_by_key("k-1").unwrap().unwrap();
        assert_eq!(record.risk.score, 42);
        assert!(!record.risk.fallback);
    }

    #[tokio::test]
    async fn test_challenge_parks_then_resumes_the_submission() {
        let (pipeline, repository) = pipeline(Some("CHALLENGE"));
        let response = pipeline.submit(facts("k-1")).await.unwrap();

        let challenge = match response.outcome {
            SubmissionOutcome::ChallengeRequired { challenge } => challenge,
            other => panic!("unexpected outcome {:?}", other),
        };
        assert_eq!(challenge.method, "3DS2");
        assert!(repository.is_empty());

        let resumed = pipeline
            .complete_challenge(challenge.challenge_ref)
            .await
            .unwrap();
        assert!(matches!(resumed.outcome, SubmissionOutcome::Settled { .. }));
        let record = repository.find_by_key("k-1").unwrap().unwrap();
        assert_eq!(
            record.risk.decision,
            crate::risk::RiskDecision::ProceedFlagged
        );

        // A challenge resolves at most once.
        let err = pipeline
            .complete_challenge(challenge.challenge_ref)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_challenge_ref_is_rejected() {
        let (pipeline, _) = pipeline(Some("APPROVED"));
        let err = pipeline.complete_challenge(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_finalization_updates_the_derived_set() {
        let (pipeline, _repository) = pipeline(Some("APPROVED"));
        pipeline.submit(facts("k-1")).await.unwrap();

        let updated = pipeline
            .finalize(
                "k-1",
                &FinalizationFacts {
                    acquirer_settled_amount: Some(dec!(98.50)),
                    acquirer_settled_on: Some(d(2024, 7, 3)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.derived.display(VarId::SettlementStatus), "Settled in full");
        assert_eq!(
            updated.derived.display(VarId::AcquirerSettledDate),
            "2024-07-03"
        );
        // Remittance facts are still pending.
        assert_eq!(
            updated.derived.display(VarId::RemittanceStatus),
            "Not finalized"
        );
    }

    #[tokio::test]
    async fn test_finalizing_an_unknown_key_is_not_found() {
        let (pipeline, _) = pipeline(Some("APPROVED"));
        let err = pipeline
            .finalize("missing", &FinalizationFacts::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::NotFound(_))
        ));
    }
}
