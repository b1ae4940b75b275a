//! Connectivity probe: table existence and seed data checks.
//!
//! Layout:
//! - `tables.rs`: expected tables and static remediation strings
//! - `prober.rs`: the sequential probe and its result types
//! - `report.rs`: console rendering of the results

pub mod prober;
pub mod report;
pub mod tables;

pub use prober::{Outcome, ProbeReport, Prober, SeedData, TableStatus};
pub use report::{render_fatal, render_header, render_report};

use crate::api::TableReader;
use crate::config::{Config, Credentials};
use crate::error::ProbeError;

/// Validate configuration, then build a reader with `connect` and probe.
/// `connect` is never called when the credentials are unusable.
pub async fn run<R, F>(cfg: &Config, connect: F) -> Result<ProbeReport, ProbeError>
where
    R: TableReader,
    F: FnOnce(&Credentials, &Config) -> Result<R, ProbeError>,
{
    let creds = cfg.credentials()?;
    let reader = connect(&creds, cfg)?;
    Prober::default().run(&reader).await
}

/// Process status for a finished run. Incomplete runs still exit 0; the
/// remediation text is informational.
pub fn exit_code(result: &Result<ProbeReport, ProbeError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
