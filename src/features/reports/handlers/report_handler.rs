use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
use crate::features::reports::services::ReportService;

/// List all reports, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "All reports ordered by timestamp descending", body = Vec<ReportResponseDto>),
        (status = 500, description = "Report store unavailable")
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    let reports = service.list().await?;
    Ok(Json(reports))
}

/// Submit a geotagged incident report
///
/// Reporter identity fields are taken from the body as-is.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report stored", body = ReportResponseDto),
        (status = 400, description = "Malformed or invalid payload"),
        (status = 500, description = "Report store unavailable")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ReportResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(report)))
}
