//! Clubpos Core - Transaction settlement derivation engine.
//!
//! This crate contains the settlement pipeline of the clubpos POS platform:
//! rate table resolution, discount/cashback pricing, the variable
//! derivation engine behind receipts and back-office ledgers, the
//! idempotent submission gate and the fail-open risk gate. It is
//! storage-agnostic: persistence adapters implement the repository traits,
//! and in-memory reference implementations back the test suite.

pub mod constants;
pub mod derivation;
pub mod discount;
pub mod errors;
pub mod facts;
pub mod rates;
pub mod reporting;
pub mod risk;
pub mod settlement;
pub mod storage;
pub mod utils;

// Re-export the types a caller needs to run the pipeline
pub use derivation::{DerivedVariableSet, SlotValue, VarId, VariableDerivationEngine};
pub use discount::{DiscountCalculator, PricingResult};
pub use facts::{FinalizationFacts, PaymentMethod, RawTransactionFacts};
pub use rates::{RateTableEntry, RateTableResolver};
pub use settlement::{SettlementPipeline, SubmissionOutcome, SubmissionResponse};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
