use thiserror::Error;

/// Errors raised while loading the variable catalogue.
///
/// Evaluation itself never errors: bad slots degrade individually and are
/// reported as diagnostics on the derived set.
#[derive(Debug, Error)]
pub enum DerivationError {
    #[error("Variable catalogue is invalid: {0}")]
    CatalogueInvalid(String),
}
