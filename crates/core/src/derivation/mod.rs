//! Variable derivation module - the formula engine behind receipts and
//! back-office ledgers.
//!
//! A fixed catalogue of named variables is evaluated in one deterministic
//! pass over the transaction facts, the pricing result and whatever
//! finalization facts exist so far. The same pass serves the synchronous
//! receipt path and the bulk reporting path.

mod catalogue;
mod derivation_errors;
mod engine;
mod expr;
mod variables;

#[cfg(test)]
mod catalogue_tests;
#[cfg(test)]
mod engine_tests;

pub use catalogue::{BaseFact, Catalogue, Slot, VariableKind};
pub use derivation_errors::DerivationError;
pub use engine::{DerivedVariableSet, Diagnostic, SlotValue, VariableDerivationEngine};
pub use expr::{BinOp, CmpOp, Cond, Expr};
pub use variables::VarId;
