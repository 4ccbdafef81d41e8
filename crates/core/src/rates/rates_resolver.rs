use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::errors::Result;
use crate::facts::PaymentMethod;
use crate::rates::rates_errors::RateTableError;
use crate::rates::rates_model::{RateProgram, RateTableEntry};
use crate::rates::rates_traits::RateTableRepositoryTrait;

/// Cache behavior for the resolver.
#[derive(Debug, Clone)]
pub struct RateCacheConfig {
    /// How long a store's entries are served from memory before reloading.
    pub ttl: Duration,
}

impl Default for RateCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
        }
    }
}

struct CachedEntries {
    entries: Arc<Vec<RateTableEntry>>,
    loaded_at: Instant,
}

/// Resolves the single rate table entry governing a sale.
///
/// Entries are loaded per store and cached with a TTL; resolution itself is
/// pure over the loaded snapshot, so two lookups against the same snapshot
/// always agree.
#[derive(Clone)]
pub struct RateTableResolver {
    repository: Arc<dyn RateTableRepositoryTrait>,
    cache: Arc<RwLock<HashMap<String, CachedEntries>>>,
    config: RateCacheConfig,
}

impl RateTableResolver {
    pub fn new(repository: Arc<dyn RateTableRepositoryTrait>) -> Self {
        Self::with_config(repository, RateCacheConfig::default())
    }

    pub fn with_config(
        repository: Arc<dyn RateTableRepositoryTrait>,
        config: RateCacheConfig,
    ) -> Self {
        Self {
            repository,
            cache: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Resolves the entry for one program of a sale.
    ///
    /// Returns `Ok(None)` when the store simply has no matching entry (the
    /// caller decides whether that is fatal). When several entries match,
    /// the one with the latest `valid_from` wins; entries tied on the latest
    /// `valid_from` make the table ambiguous, which is an error.
    pub fn resolve(
        &self,
        store_id: &str,
        program: RateProgram,
        payment_method: PaymentMethod,
        installment_count: u32,
        on: NaiveDate,
    ) -> Result<Option<RateTableEntry>> {
        let entries = self.entries(store_id)?;

        let mut matching: Vec<&RateTableEntry> = entries
            .iter()
            .filter(|entry| entry.matches(program, payment_method, installment_count, on))
            .collect();

        match matching.len() {
            0 => Ok(None),
            1 => Ok(Some(matching[0].clone())),
            _ => {
                matching.sort_by(|a, b| b.valid_from.cmp(&a.valid_from));
                let latest = matching[0].valid_from;
                let tied: Vec<&&RateTableEntry> = matching
                    .iter()
                    .filter(|entry| entry.valid_from == latest)
                    .collect();
                if tied.len() > 1 {
                    return Err(RateTableError::AmbiguousEntries {
                        store_id: store_id.to_string(),
                        entry_ids: tied.iter().map(|entry| entry.id.clone()).collect(),
                        valid_from: latest,
                    }
                    .into());
                }
                Ok(Some(matching[0].clone()))
            }
        }
    }

    /// Drops all cached entries, forcing the next lookup to reload.
    pub fn invalidate(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    fn entries(&self, store_id: &str) -> Result<Arc<Vec<RateTableEntry>>> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|e| RateTableError::Cache(e.to_string()))?;
            if let Some(cached) = cache.get(store_id) {
                if cached.loaded_at.elapsed() < self.config.ttl {
                    return Ok(cached.entries.clone());
                }
            }
        }

        let loaded = Arc::new(self.repository.entries_for_store(store_id)?);
        let mut cache = self
            .cache
            .write()
            .map_err(|e| RateTableError::Cache(e.to_string()))?;
        cache.insert(
            store_id.to_string(),
            CachedEntries {
                entries: loaded.clone(),
                loaded_at: Instant::now(),
            },
        );
        log::debug!(
            "Loaded {} rate table entries for store {}",
            loaded.len(),
            store_id
        );
        Ok(loaded)
    }
}
