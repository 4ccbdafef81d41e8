use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::derivation::DerivedVariableSet;
use crate::errors::{DatabaseError, Result};
use crate::facts::FinalizationFacts;
use crate::rates::{RateTableEntry, RateTableRepositoryTrait};
use crate::settlement::{SettlementRecord, SettlementRepositoryTrait};

/// Settlement store backed by a concurrent map.
///
/// The map's entry API makes `insert_or_fetch` atomic per key, which is the
/// uniqueness guarantee the idempotency gate requires.
#[derive(Default)]
pub struct InMemorySettlementRepository {
    records: DashMap<String, SettlementRecord>,
}

impl InMemorySettlementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops records created before the cutoff and returns how many were
    /// removed. Callers derive the cutoff from the retention window.
    pub fn prune_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let before = self.records.len();
        self.records.retain(|_, record| record.created_at >= cutoff);
        before - self.records.len()
    }
}

#[async_trait]
impl SettlementRepositoryTrait for InMemorySettlementRepository {
    fn find_by_key(&self, idempotency_key: &str) -> Result<Option<SettlementRecord>> {
        Ok(self
            .records
            .get(idempotency_key)
            .map(|entry| entry.value().clone()))
    }

    async fn insert_or_fetch(
        &self,
        record: SettlementRecord,
    ) -> Result<(SettlementRecord, bool)> {
        match self.records.entry(record.idempotency_key.clone()) {
            Entry::Occupied(existing) => Ok((existing.get().clone(), false)),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok((record, true))
            }
        }
    }

    async fn store_finalization(
        &self,
        idempotency_key: &str,
        finalization: FinalizationFacts,
        derived: DerivedVariableSet,
    ) -> Result<SettlementRecord> {
        let mut entry = self.records.get_mut(idempotency_key).ok_or_else(|| {
            DatabaseError::NotFound(format!("no settlement for key {}", idempotency_key))
        })?;
        entry.finalization = finalization;
        entry.derived = derived;
        Ok(entry.clone())
    }

    fn list_all(&self) -> Result<Vec<SettlementRecord>> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}

/// Rate table held in memory, loaded once at startup or by tests.
#[derive(Default)]
pub struct InMemoryRateTableRepository {
    entries: RwLock<Vec<RateTableEntry>>,
}

impl InMemoryRateTableRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<RateTableEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn add(&self, entry: RateTableEntry) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| DatabaseError::Internal(e.to_string()))?;
        entries.push(entry);
        Ok(())
    }
}

impl RateTableRepositoryTrait for InMemoryRateTableRepository {
    fn entries_for_store(&self, store_id: &str) -> Result<Vec<RateTableEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DatabaseError::Internal(e.to_string()))?;
        Ok(entries
            .iter()
            .filter(|entry| entry.store_id == store_id)
            .cloned()
            .collect())
    }
}
