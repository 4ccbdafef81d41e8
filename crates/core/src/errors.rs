//! Core error types for the clubpos settlement library.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (SQL drivers, key-value stores, etc.) are converted into these types by
//! the repository implementations.

use thiserror::Error;

use crate::derivation::DerivationError;
use crate::rates::RateTableError;
use crate::risk::RiskError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the settlement core.
///
/// A submission caller only ever observes `Validation` (rejected before any
/// gate) or `Database` on the final write; everything else is absorbed into
/// non-fatal outcomes (fail-open risk decisions, per-variable degradation
/// diagnostics, replay of prior results).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Rate table error: {0}")]
    RateTable(#[from] RateTableError),

    #[error("Derivation error: {0}")]
    Derivation(#[from] DerivationError),

    #[error("Risk gate error: {0}")]
    Risk(#[from] RiskError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for repository operations.
///
/// Repository implementations convert their driver-specific errors into this
/// format. `UniqueViolation` is load-bearing: the idempotent submission gate
/// relies on it to detect a concurrently inserted record for the same key.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a connection to the backing store.
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// A query failed to execute.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (duplicate idempotency key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A transaction failed to commit.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Internal/unexpected store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Validation errors for submitted transaction facts.
///
/// These are fatal for the submission and are raised before the idempotency
/// or risk gates run.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Installment count {0} is outside the accepted range 1..=12")]
    InstallmentCountOutOfRange(u32),

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] chrono::ParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
