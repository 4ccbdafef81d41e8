//! Raw transaction facts captured at the point of sale.

mod facts_model;
#[cfg(test)]
mod facts_model_tests;

pub use facts_model::{FinalizationFacts, PaymentMethod, RawTransactionFacts};
