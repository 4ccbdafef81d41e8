//! Shared numeric and formatting helpers.

mod money_utils;
mod schedule_utils;

pub use money_utils::{
    effective_cost_rate, format_currency_brl, format_percent, round_money, round_rate,
};
pub use schedule_utils::next_friday;
