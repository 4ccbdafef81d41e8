use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::discount::discount_model::{DiscountBreakdown, PriceAdjustment, PricingResult};
use crate::errors::Result;
use crate::facts::{PaymentMethod, RawTransactionFacts};
use crate::rates::{RateProgram, RateTableEntry, RateTableResolver};
use crate::utils::{effective_cost_rate, next_friday, round_money};

/// Prices a sale against the store's rate table.
///
/// Every sale settles under the STANDARD program. Club sales are priced a
/// second time under the CASHBACK program, over the already-discounted
/// standard net, and the gap between the two nets is the cashback owed to
/// the member. Walk-in sales take the standard entry's installment
/// surcharge but no discount and no cashback.
#[derive(Clone)]
pub struct DiscountCalculator {
    resolver: RateTableResolver,
}

impl DiscountCalculator {
    pub fn new(resolver: RateTableResolver) -> Self {
        Self { resolver }
    }

    pub fn price(&self, facts: &RawTransactionFacts) -> Result<PricingResult> {
        let standard_entry = self.resolver.resolve(
            &facts.store_id,
            RateProgram::Standard,
            facts.payment_method,
            facts.installment_count,
            facts.transaction_date,
        )?;

        let standard = price_program(
            RateProgram::Standard,
            facts.gross_amount,
            facts.payment_method,
            facts.installment_count,
            standard_entry.as_ref(),
            facts.is_club(),
        );

        let mut cashback_program = None;
        let mut cashback_amount = Decimal::ZERO;
        let mut negative_cashback_clamped = false;
        let mut cashback_program_rate = Decimal::ZERO;

        if facts.is_club() && !facts.gross_amount.is_zero() {
            let cashback_entry = self.resolver.resolve(
                &facts.store_id,
                RateProgram::Cashback,
                facts.payment_method,
                facts.installment_count,
                facts.transaction_date,
            )?;
            if let Some(entry) = cashback_entry {
                cashback_program_rate = entry.discount_rate;
                // The cashback program reprices the standard net, so the
                // member's discount and cashback stack.
                let repriced = price_program(
                    RateProgram::Cashback,
                    standard.net_amount,
                    facts.payment_method,
                    facts.installment_count,
                    Some(&entry),
                    true,
                );
                let gap = standard.net_amount - repriced.net_amount;
                if gap.is_sign_negative() {
                    log::warn!(
                        "Cashback entry {} for store {} nets above the standard \
                         program; clamping cashback to zero",
                        entry.id,
                        facts.store_id
                    );
                    negative_cashback_clamped = true;
                } else {
                    cashback_amount = round_money(gap);
                }
                cashback_program = Some(repriced);
            }
        }

        let settlement_days = standard_entry
            .as_ref()
            .map(|entry| entry.settlement_days)
            .unwrap_or(0);
        let settlement_due_date =
            facts.transaction_date + Duration::days(i64::from(settlement_days));
        let cashback_payout_date = if cashback_amount > Decimal::ZERO {
            Some(next_friday(facts.transaction_date))
        } else {
            None
        };

        let effective_rate = if facts.payment_method == PaymentMethod::CreditInstallments {
            effective_cost_rate(
                standard.per_installment,
                facts.gross_amount,
                facts.installment_count,
            )
        } else {
            Decimal::ZERO
        };

        Ok(PricingResult {
            adjustment: PriceAdjustment::from_amounts(standard.net_amount, facts.gross_amount),
            commission_rate: rate_of(standard_entry.as_ref(), |e| e.commission_rate),
            acquirer_cost_rate: rate_of(standard_entry.as_ref(), |e| e.acquirer_cost_rate),
            partner_rate: rate_of(standard_entry.as_ref(), |e| e.partner_rate),
            tax_rate: rate_of(standard_entry.as_ref(), |e| e.tax_rate),
            cashback_program_rate,
            settlement_days,
            settlement_due_date,
            cashback_payout_date,
            effective_cost_rate: effective_rate,
            standard,
            cashback_program,
            cashback_amount,
            negative_cashback_clamped,
        })
    }
}

fn rate_of<F>(entry: Option<&RateTableEntry>, pick: F) -> Decimal
where
    F: Fn(&RateTableEntry) -> Decimal,
{
    entry.map(pick).unwrap_or(Decimal::ZERO)
}

/// Prices one program over a gross base.
///
/// `CREDIT_INSTALLMENTS` composes the member discount with the anticipation
/// surcharge averaged over the advance periods, then rounds at the
/// per-installment level so the installments reconcile exactly to the net:
///
/// ```text
/// effective_rate  = 1 - discount + anticipation * (n + 1) / 2
/// per_installment = round2(gross * effective_rate / n)
/// net             = per_installment * n
/// ```
///
/// Single-installment methods apply the discount directly. Without an entry
/// the amount passes through unchanged.
fn price_program(
    program: RateProgram,
    gross: Decimal,
    payment_method: PaymentMethod,
    installment_count: u32,
    entry: Option<&RateTableEntry>,
    club: bool,
) -> DiscountBreakdown {
    let discount_rate = match entry {
        Some(e) if club => e.discount_rate,
        _ => Decimal::ZERO,
    };
    let anticipation_rate = entry.map(|e| e.anticipation_rate).unwrap_or(Decimal::ZERO);

    let (net, per_installment) = if gross.is_zero() || entry.is_none() {
        (gross, per_installment_of(gross, installment_count))
    } else if payment_method == PaymentMethod::CreditInstallments {
        let n = Decimal::from(installment_count);
        let effective = Decimal::ONE - discount_rate
            + anticipation_rate * (n + Decimal::ONE) / dec!(2);
        let per_installment = round_money(gross * effective / n);
        (per_installment * n, per_installment)
    } else {
        let net = round_money(gross * (Decimal::ONE - discount_rate));
        (net, net)
    };

    DiscountBreakdown {
        program,
        entry_id: entry.map(|e| e.id.clone()),
        gross_amount: gross,
        net_amount: net,
        per_installment,
        installment_count,
        discount_rate,
        anticipation_rate,
    }
}

fn per_installment_of(net: Decimal, installment_count: u32) -> Decimal {
    if installment_count <= 1 {
        net
    } else {
        round_money(net / Decimal::from(installment_count))
    }
}
