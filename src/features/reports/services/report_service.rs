use std::sync::Arc;

use crate::core::error::Result;
use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
use crate::features::reports::stores::ReportStore;

/// Service for report operations
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// List every report, newest first
    pub async fn list(&self) -> Result<Vec<ReportResponseDto>> {
        let reports = self.store.list().await?;
        tracing::debug!("Listed {} reports", reports.len());
        Ok(reports.into_iter().map(ReportResponseDto::from).collect())
    }

    /// Store a submitted report. The payload is expected to be validated.
    pub async fn create(&self, dto: CreateReportDto) -> Result<ReportResponseDto> {
        let report = self.store.insert(dto.into()).await?;

        tracing::info!(
            "Report created: id={}, type={}, lat={}, lng={}, user_id={}",
            report.id,
            report.incident_type,
            report.lat,
            report.lng,
            report.user_id
        );

        Ok(report.into())
    }
}
