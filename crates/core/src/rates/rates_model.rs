use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::facts::PaymentMethod;

/// Which pricing program an entry belongs to.
///
/// Every sale settles under `Standard`; club sales additionally resolve a
/// `Cashback` entry, and the gap between the two nets funds the cashback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateProgram {
    Standard,
    Cashback,
}

impl RateProgram {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateProgram::Standard => "STANDARD",
            RateProgram::Cashback => "CASHBACK",
        }
    }
}

/// One row of the negotiated rate table for a store.
///
/// An entry matches a sale when program, payment method, installment range
/// and validity window all accept it. Rates are stored as ratios (0.05 for
/// 5%), already scaled to at most 4 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTableEntry {
    pub id: String,
    pub store_id: String,
    pub program: RateProgram,
    pub payment_method: PaymentMethod,
    /// Inclusive installment range this entry covers.
    pub installments_from: u32,
    pub installments_to: u32,
    /// Price discount applied to the customer, per installment tier.
    pub discount_rate: Decimal,
    /// Monthly anticipation rate charged for advancing receivables.
    pub anticipation_rate: Decimal,
    /// Platform commission over the net amount.
    pub commission_rate: Decimal,
    /// What the acquirer charges the platform for this arrangement.
    pub acquirer_cost_rate: Decimal,
    /// Share of the net owed to the white-label partner.
    pub partner_rate: Decimal,
    /// Taxes withheld over platform revenue.
    pub tax_rate: Decimal,
    /// Days until the acquirer settles funds for this arrangement.
    pub settlement_days: u32,
    /// Validity window `[valid_from, valid_to)`; open-ended when `valid_to`
    /// is `None`.
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>,
}

impl RateTableEntry {
    /// Whether this entry accepts the given sale shape at the given date.
    pub fn matches(
        &self,
        program: RateProgram,
        payment_method: PaymentMethod,
        installment_count: u32,
        on: NaiveDate,
    ) -> bool {
        self.program == program
            && self.payment_method == payment_method
            && installment_count >= self.installments_from
            && installment_count <= self.installments_to
            && on >= self.valid_from
            && self.valid_to.map(|until| on < until).unwrap_or(true)
    }
}
