//! Bulk back-office reporting over settled records.

mod reporting_service;

#[cfg(test)]
mod reporting_service_tests;

pub use reporting_service::{LedgerRow, ReportingService};
