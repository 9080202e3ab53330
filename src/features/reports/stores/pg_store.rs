use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, Report};
use crate::features::reports::stores::ReportStore;

const REPORT_COLUMNS: &str = r#"
    id, user_id, user_name, user_photo, incident_type, description,
    lat, lng, status, created_at
"#;

/// PostgreSQL-backed report store
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn list(&self) -> Result<Vec<Report>> {
        let query = format!(
            "SELECT {} FROM reports ORDER BY created_at DESC, id DESC",
            REPORT_COLUMNS
        );

        sqlx::query_as::<_, Report>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, data: CreateReport) -> Result<Report> {
        let query = format!(
            r#"
            INSERT INTO reports (
                id, user_id, user_name, user_photo, incident_type, description, lat, lng
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        );

        sqlx::query_as::<_, Report>(&query)
            .bind(Uuid::now_v7())
            .bind(&data.user_id)
            .bind(&data.user_name)
            .bind(&data.user_photo)
            .bind(data.incident_type)
            .bind(&data.description)
            .bind(data.lat)
            .bind(data.lng)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert report: {:?}", e);
                AppError::Database(e)
            })
    }
}
