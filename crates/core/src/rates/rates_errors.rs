use thiserror::Error;

/// Errors specific to rate table resolution.
#[derive(Debug, Error)]
pub enum RateTableError {
    /// Two or more matching entries share the latest `valid_from`, so no
    /// deterministic winner exists. The table itself must be fixed.
    #[error(
        "Ambiguous rate table for store '{store_id}': entries {entry_ids:?} \
         all start on {valid_from}"
    )]
    AmbiguousEntries {
        store_id: String,
        entry_ids: Vec<String>,
        valid_from: chrono::NaiveDate,
    },

    #[error("Rate cache error: {0}")]
    Cache(String),
}
