//! Settlement module - the idempotent submission pipeline.

mod pipeline;
mod settlement_model;
mod settlement_traits;

#[cfg(test)]
mod pipeline_tests;

pub use pipeline::SettlementPipeline;
pub use settlement_model::{Receipt, SettlementRecord, SubmissionOutcome, SubmissionResponse};
pub use settlement_traits::SettlementRepositoryTrait;
