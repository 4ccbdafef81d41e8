use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::constants::{MONEY_SCALE, RATE_SCALE};

/// Rounds a money amount to 2 decimal places, half away from zero.
///
/// Every currency amount that leaves a calculation goes through this, so
/// that POS-receipt and bulk-reporting paths agree to the cent.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a rate or percentage to 4 decimal places, half away from zero.
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a money amount in Brazilian convention: `R$ 1.234,56`.
///
/// Negative amounts render as `-R$ 1.234,56`.
pub fn format_currency_brl(value: Decimal) -> String {
    let rounded = round_money(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    // Split into integer and cent parts after rounding to exactly 2 dp.
    let cents = (abs * dec!(100)).trunc();
    let integer = (cents / dec!(100)).trunc();
    let fraction = cents - integer * dec!(100);

    let integer_digits = integer.to_u128().unwrap_or(0).to_string();
    let mut grouped = String::with_capacity(integer_digits.len() + integer_digits.len() / 3);
    for (i, ch) in integer_digits.chars().enumerate() {
        if i > 0 && (integer_digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, fraction.to_u32().unwrap_or(0))
}

/// Formats a ratio as a percentage with 2 decimal places: `0.0234` -> `2.34%`.
pub fn format_percent(ratio: Decimal) -> String {
    let percent = round_money(ratio * dec!(100));
    format!("{:.2}%", percent)
}

/// Computes the effective monthly cost rate implied by an installment plan.
///
/// Given a principal received today and `n` equal monthly installments of
/// `installment`, finds the rate `i` such that the present value of the
/// installment stream equals the principal. Solved by bisection since the
/// annuity equation has no closed form for `i`.
///
/// Returns 0 when the plan carries no financing cost (total paid <= principal)
/// or when the inputs are degenerate.
pub fn effective_cost_rate(installment: Decimal, principal: Decimal, count: u32) -> Decimal {
    if count == 0 || principal <= Decimal::ZERO || installment <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let total = installment * Decimal::from(count);
    if total <= principal {
        return Decimal::ZERO;
    }

    // Present value of `count` monthly payments at rate `i`.
    let present_value = |rate: Decimal| -> Decimal {
        let mut factor = Decimal::ONE;
        let mut pv = Decimal::ZERO;
        for _ in 0..count {
            factor /= Decimal::ONE + rate;
            pv += installment * factor;
        }
        pv
    };

    let mut low = Decimal::ZERO;
    let mut high = Decimal::ONE; // 100% per month bounds any sane plan
    for _ in 0..64 {
        let mid = (low + high) / dec!(2);
        if present_value(mid) > principal {
            low = mid;
        } else {
            high = mid;
        }
    }
    round_rate((low + high) / dec!(2))
}
