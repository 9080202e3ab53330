//! Persistence backends for the report collection.

mod memory_store;
mod pg_store;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::reports::models::{CreateReport, Report};

pub use memory_store::MemoryReportStore;
pub use pg_store::PgReportStore;

/// Append-only report collection
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// All reports, newest first
    async fn list(&self) -> Result<Vec<Report>>;

    /// Insert a report and return it with its id and timestamp assigned
    async fn insert(&self, data: CreateReport) -> Result<Report>;
}
