use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::reports::models::{CreateReport, IncidentType, Report, ReportStatus};

fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite"))
    }
}

/// Request DTO for submitting a report
///
/// Every accepted field is listed here; anything else in the body is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateReportDto {
    /// Incident category
    #[serde(rename = "type")]
    pub incident_type: IncidentType,

    /// Free-text description (may be empty)
    #[serde(default)]
    pub description: String,

    #[validate(
        range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"),
        custom(function = "validate_finite", message = "Latitude must be a finite number")
    )]
    pub lat: f64,

    #[validate(
        range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"),
        custom(function = "validate_finite", message = "Longitude must be a finite number")
    )]
    pub lng: f64,

    /// Reporter id from the identity provider
    #[validate(length(min = 1, max = 128, message = "User id must be 1-128 characters"))]
    pub user_id: String,

    #[validate(length(max = 255, message = "User name must not exceed 255 characters"))]
    pub user_name: Option<String>,

    #[validate(url(message = "User photo must be a valid URL"))]
    pub user_photo: Option<String>,
}

impl From<CreateReportDto> for CreateReport {
    fn from(dto: CreateReportDto) -> Self {
        Self {
            user_id: dto.user_id,
            user_name: dto.user_name,
            user_photo: dto.user_photo,
            incident_type: dto.incident_type,
            description: dto.description,
            lat: dto.lat,
            lng: dto.lng,
        }
    }
}

/// Response DTO for report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub user_id: String,
    pub user_name: Option<String>,
    pub user_photo: Option<String>,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub status: ReportStatus,
    pub timestamp: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            user_name: r.user_name,
            user_photo: r.user_photo,
            incident_type: r.incident_type,
            description: r.description,
            lat: r.lat,
            lng: r.lng,
            status: r.status,
            timestamp: r.created_at,
        }
    }
}
