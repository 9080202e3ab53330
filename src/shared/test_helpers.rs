#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use fake::{
    faker::{lorem::en::Sentence, name::en::Name},
    Fake,
};

#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::reports::dtos::CreateReportDto;
#[cfg(test)]
use crate::features::reports::models::{CreateReport, IncidentType, Report};
#[cfg(test)]
use crate::features::reports::stores::{MemoryReportStore, ReportStore};

/// Minimal valid submission with description "x"
#[cfg(test)]
pub fn sample_report_dto(incident_type: IncidentType, lat: f64, lng: f64) -> CreateReportDto {
    CreateReportDto {
        incident_type,
        description: "x".to_string(),
        lat,
        lng,
        user_id: "test-uid".to_string(),
        user_name: Some("Test Reporter".to_string()),
        user_photo: None,
    }
}

/// Submission with generated reporter name and description
#[cfg(test)]
pub fn fake_report_dto() -> CreateReportDto {
    let index = (0..IncidentType::ALL.len()).fake::<usize>();
    CreateReportDto {
        incident_type: IncidentType::ALL[index],
        description: Sentence(3..8).fake(),
        lat: (-90.0_f64..90.0).fake(),
        lng: (-180.0_f64..180.0).fake(),
        user_id: format!("uid-{}", (1000u32..9999).fake::<u32>()),
        user_name: Some(Name().fake()),
        user_photo: None,
    }
}

/// Store whose backend is never reachable
#[cfg(test)]
pub struct UnreachableReportStore;

#[cfg(test)]
#[async_trait]
impl ReportStore for UnreachableReportStore {
    async fn list(&self) -> Result<Vec<Report>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _data: CreateReport) -> Result<Report> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Store that lists normally but whose writes never reach the backend
#[cfg(test)]
#[derive(Default)]
pub struct ReadOnlyReportStore {
    inner: MemoryReportStore,
}

#[cfg(test)]
#[async_trait]
impl ReportStore for ReadOnlyReportStore {
    async fn list(&self) -> Result<Vec<Report>> {
        self.inner.list().await
    }

    async fn insert(&self, _data: CreateReport) -> Result<Report> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}
