//! Discount and cashback pricing over the resolved rate table.

mod discount_calculator;
mod discount_model;


pub use discount_calculator::DiscountCalculator;
pub use discount_model::{DiscountBreakdown, PriceAdjustment, PricingResult};
