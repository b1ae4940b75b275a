use super::tables::{EXPECTED_TABLES, SEED_DISPLAY_FIELD, SEED_TABLE};
use crate::api::TableReader;
use crate::error::ProbeError;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Result of reading one expected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Exists,
    /// The service answered with an error: absent table or no read grant.
    Missing(String),
    /// The request itself failed.
    Error(String),
}

impl TableStatus {
    pub fn exists(&self) -> bool {
        matches!(self, TableStatus::Exists)
    }

    fn from_error(err: ProbeError) -> Self {
        if err.is_upstream() {
            TableStatus::Missing(err.to_string())
        } else {
            TableStatus::Error(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every expected table answered.
    Success,
    Incomplete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedData {
    /// Display names of the seed rows, in the order returned.
    Loaded(Vec<String>),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub tables: Vec<(&'static str, TableStatus)>,
    /// Only read on `Outcome::Success`.
    pub seed: Option<SeedData>,
}

impl ProbeReport {
    pub fn outcome(&self) -> Outcome {
        if self.tables.iter().all(|(_, status)| status.exists()) {
            Outcome::Success
        } else {
            Outcome::Incomplete
        }
    }
}

/// Sequential existence probe over a fixed table list.
pub struct Prober {
    tables: &'static [&'static str],
}

impl Default for Prober {
    fn default() -> Self {
        Self::new(EXPECTED_TABLES)
    }
}

impl Prober {
    pub fn new(tables: &'static [&'static str]) -> Self {
        Self { tables }
    }

    /// Only a failed `ping` escapes; per-table failures land in the report.
    pub async fn run<R: TableReader>(&self, reader: &R) -> Result<ProbeReport, ProbeError> {
        reader.ping().await?;

        let mut tables = Vec::with_capacity(self.tables.len());
        for &table in self.tables {
            let status = match reader.select(table, Some(1)).await {
                Ok(_) => TableStatus::Exists,
                Err(e) => {
                    warn!(table, error = %e, "table check failed");
                    TableStatus::from_error(e)
                }
            };
            debug!(table, ?status, "table checked");
            tables.push((table, status));
        }

        let mut report = ProbeReport { tables, seed: None };
        let outcome = report.outcome();
        info!(?outcome, "table checks finished");

        if outcome == Outcome::Success {
            report.seed = Some(read_seed(reader).await);
        }
        Ok(report)
    }
}

async fn read_seed<R: TableReader>(reader: &R) -> SeedData {
    match reader.select(SEED_TABLE, None).await {
        Ok(rows) if !rows.is_empty() => SeedData::Loaded(
            rows.iter()
                .map(|row| display_field(row, SEED_DISPLAY_FIELD))
                .collect(),
        ),
        Ok(_) => SeedData::Empty,
        Err(e) => {
            warn!(table = SEED_TABLE, error = %e, "seed data read failed");
            SeedData::Empty
        }
    }
}

/// Strings as-is, absent or null as empty, anything else as JSON text.
pub fn display_field(row: &Value, field: &str) -> String {
    match row.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
