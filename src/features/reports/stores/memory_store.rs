use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::reports::models::{CreateReport, Report};
use crate::features::reports::stores::ReportStore;

/// In-process report store
///
/// Reports are kept in insertion order. Timestamps are strictly increasing,
/// so two inserts within the same clock tick still list newest first.
#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<Vec<Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_timestamp(last: Option<DateTime<Utc>>) -> DateTime<Utc> {
        let now = Utc::now();
        match last {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        }
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn list(&self) -> Result<Vec<Report>> {
        let reports = self.reports.read().await;
        Ok(reports.iter().rev().cloned().collect())
    }

    async fn insert(&self, data: CreateReport) -> Result<Report> {
        let mut reports = self.reports.write().await;
        let created_at = Self::next_timestamp(reports.last().map(|r| r.created_at));
        let report = data.into_report(Uuid::now_v7(), created_at);
        reports.push(report.clone());
        Ok(report)
    }
}
