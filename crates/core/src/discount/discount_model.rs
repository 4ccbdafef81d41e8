use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::RateProgram;

/// Direction of the price change relative to the sticker price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceAdjustment {
    Discount,
    Surcharge,
    None,
}

impl PriceAdjustment {
    /// Suffix appended to the receipt line, empty when the price is unchanged.
    pub fn receipt_message(&self) -> &'static str {
        match self {
            PriceAdjustment::Discount => "(with discount)",
            PriceAdjustment::Surcharge => "(with surcharge)",
            PriceAdjustment::None => "",
        }
    }

    pub fn from_amounts(net: Decimal, gross: Decimal) -> Self {
        if net < gross {
            PriceAdjustment::Discount
        } else if net > gross {
            PriceAdjustment::Surcharge
        } else {
            PriceAdjustment::None
        }
    }
}

/// Net price computed under one rate program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountBreakdown {
    pub program: RateProgram,
    /// Rate table entry that priced this program, absent when none matched
    /// and the amount passed through unchanged.
    pub entry_id: Option<String>,
    pub gross_amount: Decimal,
    pub net_amount: Decimal,
    pub per_installment: Decimal,
    pub installment_count: u32,
    pub discount_rate: Decimal,
    pub anticipation_rate: Decimal,
}

/// Complete pricing of one sale: the standard settlement plus the cashback
/// program comparison and the commercial rates the derivation engine needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// The program every sale settles under.
    pub standard: DiscountBreakdown,
    /// Cashback-program pricing of the standard net, present only for club
    /// sales with a matching CASHBACK entry.
    pub cashback_program: Option<DiscountBreakdown>,
    /// Cashback owed to the member, never negative.
    pub cashback_amount: Decimal,
    /// Set when the configured cashback-program rates produced a negative
    /// gap and the amount was clamped to zero.
    pub negative_cashback_clamped: bool,
    pub adjustment: PriceAdjustment,

    // Commercial rates copied from the resolved STANDARD entry, zero when
    // no entry matched.
    pub commission_rate: Decimal,
    pub acquirer_cost_rate: Decimal,
    pub partner_rate: Decimal,
    pub tax_rate: Decimal,
    /// Discount rate of the resolved CASHBACK entry, zero when absent.
    pub cashback_program_rate: Decimal,

    pub settlement_days: u32,
    /// Expected acquirer settlement date.
    pub settlement_due_date: NaiveDate,
    /// Friday the cashback pays out, present only when cashback is owed.
    pub cashback_payout_date: Option<NaiveDate>,
    /// Periodic rate implied by the installment plan (CET), zero for
    /// single-installment sales.
    pub effective_cost_rate: Decimal,
}

impl PricingResult {
    pub fn net_amount(&self) -> Decimal {
        self.standard.net_amount
    }
}
