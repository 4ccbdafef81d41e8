use std::io::Write;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::derivation::{VarId, VariableDerivationEngine};
use crate::errors::{Error, Result};
use crate::settlement::SettlementRepositoryTrait;

/// One exported ledger line: the display strings of every catalogue
/// variable, in catalogue order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    pub idempotency_key: String,
    pub columns: Vec<String>,
}

/// Builds back-office ledgers by re-deriving every settled record.
///
/// Re-derivation runs from the stored facts and stored pricing, so rows are
/// reproducible regardless of what the rate tables look like today, and a
/// row always matches the receipt that was printed at the terminal.
/// Unfinalized slots legitimately show "Not finalized".
pub struct ReportingService {
    repository: Arc<dyn SettlementRepositoryTrait>,
    engine: VariableDerivationEngine,
}

impl ReportingService {
    pub fn new(
        repository: Arc<dyn SettlementRepositoryTrait>,
        engine: VariableDerivationEngine,
    ) -> Self {
        Self { repository, engine }
    }

    /// Every retained record as a ledger row, sorted by idempotency key.
    pub fn ledger_rows(&self) -> Result<Vec<LedgerRow>> {
        let records = self.repository.list_all()?;
        log::debug!("Deriving ledger rows for {} records", records.len());

        let mut rows: Vec<LedgerRow> = records
            .par_iter()
            .map(|record| {
                let derived =
                    self.engine
                        .derive(&record.facts, &record.pricing, &record.finalization);
                LedgerRow {
                    idempotency_key: record.idempotency_key.clone(),
                    columns: derived
                        .display_view()
                        .into_iter()
                        .map(|(_, value)| value)
                        .collect(),
                }
            })
            .collect();
        rows.sort_by(|a, b| a.idempotency_key.cmp(&b.idempotency_key));
        Ok(rows)
    }

    /// Writes the ledger as CSV, headed by the variable identifiers.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["idempotency_key"];
        header.extend(VarId::ALL.iter().map(|var| var.identifier()));
        csv_writer
            .write_record(&header)
            .map_err(|e| Error::Repository(e.to_string()))?;

        for row in self.ledger_rows()? {
            let mut fields = vec![row.idempotency_key];
            fields.extend(row.columns);
            csv_writer
                .write_record(&fields)
                .map_err(|e| Error::Repository(e.to_string()))?;
        }
        csv_writer
            .flush()
            .map_err(|e| Error::Repository(e.to_string()))?;
        Ok(())
    }
}
