//! Remote collaborator: read-only access to the hosted database.
//!
//! Layout:
//! - `postgrest.rs`: `TableReader` over the Supabase REST endpoint

pub mod postgrest;

pub use postgrest::PostgrestClient;

use crate::error::ProbeError;
use serde_json::Value;
use std::future::Future;

/// Minimal read interface the prober needs from the service.
pub trait TableReader: Send + Sync {
    /// Succeeds when the service can be reached at all, whatever it answers.
    fn ping(&self) -> impl Future<Output = Result<(), ProbeError>> + Send;

    /// Read rows of `table`, at most `limit` of them when given.
    fn select(
        &self,
        table: &str,
        limit: Option<usize>,
    ) -> impl Future<Output = Result<Vec<Value>, ProbeError>> + Send;
}
