//! Shared constants for the settlement core.

/// Decimal places used for all money amounts.
pub const MONEY_SCALE: u32 = 2;

/// Decimal places used for rates and percentages.
pub const RATE_SCALE: u32 = 4;

/// Maximum number of credit installments accepted at submission.
pub const MAX_INSTALLMENTS: u32 = 12;

/// How long settled records are retained for idempotent replay, in days.
pub const IDEMPOTENCY_RETENTION_DAYS: i64 = 35;

/// Default hard timeout for the external risk scoring call, in seconds.
pub const DEFAULT_RISK_TIMEOUT_SECS: u64 = 5;

/// Neutral risk score assigned when the scoring service is unavailable.
pub const FALLBACK_RISK_SCORE: u8 = 50;

/// Version identifier of the active variable catalogue.
pub const CATALOGUE_VERSION: &str = "v1";

/// Number of variable slots in the catalogue.
pub const VARIABLE_COUNT: usize = 130;
