use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_INSTALLMENTS;
use crate::errors::ValidationError;

/// How the customer paid at the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Pix,
    Debit,
    CreditSingle,
    CreditInstallments,
}

impl PaymentMethod {
    /// Stable code used on receipts, ledgers and rate table lookups.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Debit => "DEBIT",
            PaymentMethod::CreditSingle => "CREDIT",
            PaymentMethod::CreditInstallments => "CREDIT_INSTALLMENTS",
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            PaymentMethod::CreditSingle | PaymentMethod::CreditInstallments
        )
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything captured at the terminal the moment a sale happens.
///
/// This is the immutable input to pricing and derivation. Amounts arrive
/// already scaled to 2 decimal places by the capture layer; `validate`
/// enforces that along with the structural rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransactionFacts {
    /// Client-supplied deduplication key, unique per capture attempt chain.
    pub idempotency_key: String,
    /// NSU assigned by the terminal for this sale.
    pub transaction_nsu: String,
    /// NSU echoed back by the acquirer, when available at capture time.
    pub acquirer_nsu: Option<String>,
    pub store_id: String,
    pub store_name: String,
    pub channel_name: String,
    pub terminal_serial: String,
    pub terminal_id: String,
    /// Capture-local business date and time printed on the receipt.
    pub transaction_date: NaiveDate,
    pub transaction_time: NaiveTime,
    /// Instant the submission reached the platform.
    pub submitted_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub installment_count: u32,
    pub gross_amount: Decimal,
    pub card_brand: Option<String>,
    /// Document of the enrolled club member, absent for walk-in customers.
    pub customer_document: Option<String>,
}

impl RawTransactionFacts {
    /// Whether the sale belongs to an enrolled club member.
    ///
    /// Club membership is what unlocks the discount and cashback programs;
    /// walk-in customers settle at commercial rates with no price benefit.
    pub fn is_club(&self) -> bool {
        self.customer_document
            .as_deref()
            .map(|doc| !doc.trim().is_empty())
            .unwrap_or(false)
    }

    /// Validates structural rules before the facts enter any gate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.idempotency_key.trim().is_empty() {
            return Err(ValidationError::MissingField("idempotencyKey".to_string()));
        }
        if self.transaction_nsu.trim().is_empty() {
            return Err(ValidationError::MissingField("transactionNsu".to_string()));
        }
        if self.store_id.trim().is_empty() {
            return Err(ValidationError::MissingField("storeId".to_string()));
        }
        if self.terminal_serial.trim().is_empty() {
            return Err(ValidationError::MissingField("terminalSerial".to_string()));
        }
        if self.gross_amount.is_sign_negative() {
            return Err(ValidationError::NegativeAmount(
                self.gross_amount.to_string(),
            ));
        }
        if self.gross_amount.scale() > 2 {
            return Err(ValidationError::InvalidInput(format!(
                "gross amount {} has more than 2 decimal places",
                self.gross_amount
            )));
        }
        match self.payment_method {
            PaymentMethod::CreditInstallments => {
                if self.installment_count < 2 || self.installment_count > MAX_INSTALLMENTS {
                    return Err(ValidationError::InstallmentCountOutOfRange(
                        self.installment_count,
                    ));
                }
            }
            _ => {
                if self.installment_count != 1 {
                    return Err(ValidationError::InvalidInput(format!(
                        "payment method {} requires a single installment, got {}",
                        self.payment_method, self.installment_count
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Post-settlement amounts recorded as money actually moves.
///
/// All fields start empty and are filled in by back-office reconciliation.
/// Derived variables that depend on an absent field report the
/// not-finalized sentinel instead of a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizationFacts {
    pub acquirer_settled_amount: Option<Decimal>,
    pub acquirer_settled_on: Option<NaiveDate>,
    pub merchant_remitted_amount: Option<Decimal>,
    pub merchant_remitted_on: Option<NaiveDate>,
    pub cashback_paid_amount: Option<Decimal>,
    pub partner_invoiced_amount: Option<Decimal>,
    pub partner_paid_amount: Option<Decimal>,
}

impl FinalizationFacts {
    pub fn is_empty(&self) -> bool {
        self == &FinalizationFacts::default()
    }

    /// Merge newly reconciled amounts over the existing ones.
    ///
    /// Present fields win; absent fields keep whatever was already recorded,
    /// so partial reconciliation batches never erase earlier data.
    pub fn merge(&mut self, update: &FinalizationFacts) {
        if update.acquirer_settled_amount.is_some() {
            self.acquirer_settled_amount = update.acquirer_settled_amount;
        }
        if update.acquirer_settled_on.is_some() {
            self.acquirer_settled_on = update.acquirer_settled_on;
        }
        if update.merchant_remitted_amount.is_some() {
            self.merchant_remitted_amount = update.merchant_remitted_amount;
        }
        if update.merchant_remitted_on.is_some() {
            self.merchant_remitted_on = update.merchant_remitted_on;
        }
        if update.cashback_paid_amount.is_some() {
            self.cashback_paid_amount = update.cashback_paid_amount;
        }
        if update.partner_invoiced_amount.is_some() {
            self.partner_invoiced_amount = update.partner_invoiced_amount;
        }
        if update.partner_paid_amount.is_some() {
            self.partner_paid_amount = update.partner_paid_amount;
        }
    }
}
