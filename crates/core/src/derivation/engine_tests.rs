//! End-to-end derivation tests over real calculator pricing.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::derivation::{SlotValue, VarId, VariableDerivationEngine};
    use crate::discount::{DiscountCalculator, PricingResult};
    use crate::errors::Result;
    use crate::facts::{FinalizationFacts, PaymentMethod, RawTransactionFacts};
    use crate::rates::{
        RateProgram, RateTableEntry, RateTableRepositoryTrait, RateTableResolver,
    };

    struct FixedRepository {
        entries: Vec<RateTableEntry>,
    }

    impl RateTableRepositoryTrait for FixedRepository {
        fn entries_for_store(&self, _store_id: &str) -> Result<Vec<RateTableEntry>> {
            Ok(self.entries.clone())
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

    fn facts(gross: Decimal) -> RawTransactionFacts {
        RawTransactionFacts {
            idempotency_key: "k-1".to_string(),
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
            gross_amount: gross,
            card_brand: Some("VISA".to_string()),
            customer_document: Some("12345678900".to_string()),
        }
    }

    fn pricing_for(facts: &RawTransactionFacts) -> PricingResult {
        let calculator = DiscountCalculator::new(RateTableResolver::new(Arc::new(
            FixedRepository {
                entries: vec![standard_entry()],
            },
        )));
        calculator.price(facts).unwrap()
    }

    fn number(set: &crate::derivation::DerivedVariableSet, var: VarId) -> Decimal {
        match set.value(var) {
            SlotValue::Number(n) => *n,
            other => panic!("{} was {:?}", var.identifier(), other),
        }
    }

    #[test]
    fn test_full_derivation_of_an_installment_sale() {
        let facts = facts(dec!(100.00));
        let pricing = pricing_for(&facts);
        let engine = VariableDerivationEngine::new().unwrap();
        let set = engine.derive(&facts, &pricing, &FinalizationFacts::default());

        assert!(set.diagnostics().is_empty());
        assert_eq!(number(&set, VarId::GrossAmount), dec!(100.00));
        assert_eq!(number(&set, VarId::NetAmount), dec!(99.00));
        assert_eq!(number(&set, VarId::InstallmentAmount), dec!(33.00));
        assert_eq!(number(&set, VarId::DiscountAmount), dec!(5.00));
        assert_eq!(number(&set, VarId::DiscountedAmount), dec!(95.00));
        assert_eq!(number(&set, VarId::AnticipationFactor), dec!(0.0400));
        assert_eq!(number(&set, VarId::AnticipationCost), dec!(3.80));
        assert_eq!(number(&set, VarId::PriceAdjustmentAmount), dec!(-1.00));
        assert_eq!(number(&set, VarId::EffectiveRate), dec!(0.9900));
        assert_eq!(number(&set, VarId::CommissionAmount), dec!(2.97));
        assert_eq!(number(&set, VarId::AcquirerCostAmount), dec!(1.50));
        assert_eq!(number(&set, VarId::AcquirerNetAmount), dec!(98.50));
        assert_eq!(number(&set, VarId::PlatformGrossRevenue), dec!(6.77));
        assert_eq!(number(&set, VarId::TaxWithheldAmount), dec!(0.63));
        assert_eq!(number(&set, VarId::MerchantPayableAmount), dec!(96.03));
        assert_eq!(number(&set, VarId::PartnerShareAmount), dec!(0.99));
        assert_eq!(number(&set, VarId::PlatformMarginAmount), dec!(5.15));

        assert_eq!(
            set.value(VarId::ProgramTier),
            &SlotValue::Label("Club".to_string())
        );
        assert_eq!(
            set.value(VarId::PaymentChannel),
            &SlotValue::Label("Credit".to_string())
        );
        assert_eq!(
            set.value(VarId::HasDiscountLabel),
            &SlotValue::Label("Discount".to_string())
        );
        assert_eq!(
            set.value(VarId::ReceiptMessage),
            &SlotValue::Label("(with discount)".to_string())
        );
        assert_eq!(
            set.value(VarId::SettlementDueDate),
            &SlotValue::Label("2024-07-03".to_string())
        );
    }

    #[test]
    fn test_unfinalized_slots_carry_the_sentinel() {
        let facts = facts(dec!(100.00));
        let pricing = pricing_for(&facts);
        let engine = VariableDerivationEngine::new().unwrap();
        let set = engine.derive(&facts, &pricing, &FinalizationFacts::default());

        for var in [
            VarId::AcquirerSettledAmount,
            VarId::SettlementVarianceAmount,
            VarId::SettlementStatus,
            VarId::RealizedRevenueAmount,
            VarId::FinalResultAmount,
            VarId::ReconciliationStatus,
        ] {
            assert_eq!(set.value(var), &SlotValue::NotFinalized, "{:?}", var);
            assert_eq!(set.display(var), "Not finalized");
        }
        // Pre-settlement slots are unaffected.
        assert_eq!(number(&set, VarId::PlatformMarginAmount), dec!(5.15));
    }

    #[test]
    fn test_finalization_resolves_dependent_slots() {
        let facts = facts(dec!(100.00));
        let pricing = pricing_for(&facts);
        let engine = VariableDerivationEngine::new().unwrap();
        let finalization = FinalizationFacts {
            acquirer_settled_amount: Some(dec!(98.50)),
            acquirer_settled_on: Some(d(2024, 7, 3)),
            merchant_remitted_amount: Some(dec!(96.03)),
            merchant_remitted_on: Some(d(2024, 7, 4)),
            cashback_paid_amount: Some(dec!(0.00)),
            partner_invoiced_amount: Some(dec!(0.99)),
            partner_paid_amount: Some(dec!(0.99)),
        };
        let set = engine.derive(&facts, &pricing, &finalization);

        assert_eq!(number(&set, VarId::SettlementVarianceAmount), dec!(0.00));
        assert_eq!(
            set.value(VarId::SettlementStatus),
            &SlotValue::Label("Settled in full".to_string())
        );
        assert_eq!(
            set.value(VarId::RemittanceStatus),
            &SlotValue::Label("Remitted in full".to_string())
        );
        // realized revenue = 98.50 - 96.03
        assert_eq!(number(&set, VarId::RealizedRevenueAmount), dec!(2.47));
        assert_eq!(
            set.value(VarId::PartnerSettlementStatus),
            &SlotValue::Label("Cleared".to_string())
        );
        assert_eq!(
            set.value(VarId::AcquirerSettledDate),
            &SlotValue::Label("2024-07-03".to_string())
        );
    }

    #[test]
    fn test_zero_gross_divisions_degrade_to_zero_not_errors() {
        let facts = facts(dec!(0.00));
        let pricing = pricing_for(&facts);
        let engine = VariableDerivationEngine::new().unwrap();
        let set = engine.derive(&facts, &pricing, &FinalizationFacts::default());

        assert!(set.diagnostics().is_empty());
        assert_eq!(number(&set, VarId::EffectiveRate), dec!(0));
        assert_eq!(number(&set, VarId::PlatformMarginRate), dec!(0));
        assert_eq!(number(&set, VarId::CashbackRate), dec!(0));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let facts = facts(dec!(123.45));
        let pricing = pricing_for(&facts);
        let engine = VariableDerivationEngine::new().unwrap();

        let first = engine.derive(&facts, &pricing, &FinalizationFacts::default());
        let second = engine.derive(&facts, &pricing, &FinalizationFacts::default());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.display_view(), second.display_view());
    }

    #[test]
    fn test_display_formatting_is_brazilian() {
        let facts = facts(dec!(1234.56));
        let pricing = pricing_for(&facts);
        let engine = VariableDerivationEngine::new().unwrap();
        let set = engine.derive(&facts, &pricing, &FinalizationFacts::default());

        assert_eq!(set.display(VarId::GrossAmount), "R$ 1.234,56");
        assert_eq!(set.display(VarId::DiscountRate), "5.00%");
        assert_eq!(set.display(VarId::InstallmentCount), "3");
        assert_eq!(set.display(VarId::StoreName), "Padaria Central");
    }
}
