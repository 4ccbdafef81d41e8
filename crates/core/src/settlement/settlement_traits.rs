use async_trait::async_trait;

use crate::derivation::DerivedVariableSet;
use crate::errors::Result;
use crate::facts::FinalizationFacts;
use crate::settlement::settlement_model::SettlementRecord;

/// Trait for the settlement record store.
///
/// `insert_or_fetch` is the single serialization point of the idempotency
/// gate: implementations must make it atomic through their uniqueness
/// guarantee (unique index, conditional put) and return the already-stored
/// record on conflict, never overwrite it. Separate read-then-write
/// implementations reopen the duplicate-submission race and are incorrect.
#[async_trait]
pub trait SettlementRepositoryTrait: Send + Sync {
    /// Fast-path lookup used before any gate runs.
    fn find_by_key(&self, idempotency_key: &str) -> Result<Option<SettlementRecord>>;

    /// Inserts the record, or fetches the winner of a concurrent insert.
    /// Returns the stored record and whether this call inserted it.
    async fn insert_or_fetch(
        &self,
        record: SettlementRecord,
    ) -> Result<(SettlementRecord, bool)>;

    /// Persists merged finalization facts and the re-derived variable set
    /// for an existing record.
    async fn store_finalization(
        &self,
        idempotency_key: &str,
        finalization: FinalizationFacts,
        derived: DerivedVariableSet,
    ) -> Result<SettlementRecord>;

    /// Every retained record, for bulk reporting.
    fn list_all(&self) -> Result<Vec<SettlementRecord>>;
}
