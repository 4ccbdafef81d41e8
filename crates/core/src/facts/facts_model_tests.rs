//! Tests for transaction fact models and validation.

#[cfg(test)]
mod tests {
    use crate::facts::{FinalizationFacts, PaymentMethod, RawTransactionFacts};
    use crate::errors::ValidationError;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn sample_facts() -> RawTransactionFacts {
        RawTransactionFacts {
            idempotency_key: "SN-4455:000123:2024-06-03".to_string(),
            transaction_nsu: "000123".to_string(),
            acquirer_nsu: Some("A-99".to_string()),
            store_id: "store-7".to_string(),
            store_name: "Padaria Central".to_string(),
            channel_name: "POS".to_string(),
            terminal_serial: "SN-4455".to_string(),
            terminal_id: "T01".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            transaction_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            submitted_at: Utc.with_ymd_and_hms(2024, 6, 3, 17, 30, 5).unwrap(),
            payment_method: PaymentMethod::CreditInstallments,
            installment_count: 3,
            gross_amount: dec!(100.00),
            card_brand: Some("VISA".to_string()),
            customer_document: Some("12345678900".to_string()),
        }
    }

    #[test]
    fn test_payment_method_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Pix).unwrap(),
            "\"PIX\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditInstallments).unwrap(),
            "\"CREDIT_INSTALLMENTS\""
        );
        assert_eq!(PaymentMethod::CreditSingle.as_str(), "CREDIT");
    }

    #[test]
    fn test_valid_facts_pass_validation() {
        assert!(sample_facts().validate().is_ok());
    }

    #[test]
    fn test_is_club_requires_nonblank_document() {
        let mut facts = sample_facts();
        assert!(facts.is_club());
        facts.customer_document = Some("   ".to_string());
        assert!(!facts.is_club());
        facts.customer_document = None;
        assert!(!facts.is_club());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut facts = sample_facts();
        facts.gross_amount = dec!(-1.00);
        assert!(matches!(
            facts.validate(),
            Err(ValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_sub_cent_amount_rejected() {
        let mut facts = sample_facts();
        facts.gross_amount = dec!(10.005);
        assert!(matches!(
            facts.validate(),
            Err(ValidationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_installment_count_bounds() {
        let mut facts = sample_facts();
        facts.installment_count = 13;
        assert!(matches!(
            facts.validate(),
            Err(ValidationError::InstallmentCountOutOfRange(13))
        ));
        facts.installment_count = 1;
        assert!(matches!(
            facts.validate(),
            Err(ValidationError::InstallmentCountOutOfRange(1))
        ));
    }

    #[test]
    fn test_single_installment_methods_reject_plans() {
        let mut facts = sample_facts();
        facts.payment_method = PaymentMethod::Pix;
        facts.installment_count = 2;
        assert!(facts.validate().is_err());
        facts.installment_count = 1;
        assert!(facts.validate().is_ok());
    }

    #[test]
    fn test_blank_idempotency_key_rejected() {
        let mut facts = sample_facts();
        facts.idempotency_key = "  ".to_string();
        assert!(matches!(
            facts.validate(),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn test_finalization_merge_keeps_existing_fields() {
        let mut base = FinalizationFacts {
            acquirer_settled_amount: Some(dec!(97.00)),
            ..Default::default()
        };
        let update = FinalizationFacts {
            merchant_remitted_amount: Some(dec!(95.00)),
            ..Default::default()
        };
        base.merge(&update);
        assert_eq!(base.acquirer_settled_amount, Some(dec!(97.00)));
        assert_eq!(base.merchant_remitted_amount, Some(dec!(95.00)));
        assert!(!base.is_empty());
    }
}
