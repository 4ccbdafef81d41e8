use thiserror::Error;

/// Failures of the external scoring call.
///
/// None of these are fatal to a submission: the gate converts every variant
/// into a fail-open assessment. They exist so the fallback can be logged
/// with its cause.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Transport error calling scoring service: {0}")]
    Transport(String),

    #[error("Scoring service timed out after {0}s")]
    Timeout(u64),

    #[error("Scoring service returned status {0}")]
    Status(u16),

    #[error("Malformed scoring response: {0}")]
    MalformedResponse(String),
}
