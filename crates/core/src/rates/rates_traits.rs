use crate::errors::Result;
use crate::rates::RateTableEntry;

/// Trait for accessing the negotiated rate table.
///
/// Implementations return every entry for a store, across programs and
/// validity windows; the resolver does the matching. Loads are coarse by
/// design so the resolver can cache per store.
pub trait RateTableRepositoryTrait: Send + Sync {
    fn entries_for_store(&self, store_id: &str) -> Result<Vec<RateTableEntry>>;
}
