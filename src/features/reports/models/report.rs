use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Incident category matching the `incident_type` database enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "incident_type")]
pub enum IncidentType {
    #[default]
    #[serde(rename = "Flood - Water Rising")]
    #[sqlx(rename = "Flood - Water Rising")]
    FloodWaterRising,
    #[serde(rename = "Building Collapse")]
    #[sqlx(rename = "Building Collapse")]
    BuildingCollapse,
    #[serde(rename = "Fire Emergency")]
    #[sqlx(rename = "Fire Emergency")]
    FireEmergency,
    #[serde(rename = "Medical - Critical")]
    #[sqlx(rename = "Medical - Critical")]
    MedicalCritical,
    #[serde(rename = "Landslide / Road Block")]
    #[sqlx(rename = "Landslide / Road Block")]
    LandslideRoadBlock,
}

impl IncidentType {
    /// All categories in form order
    pub const ALL: [IncidentType; 5] = [
        IncidentType::FloodWaterRising,
        IncidentType::BuildingCollapse,
        IncidentType::FireEmergency,
        IncidentType::MedicalCritical,
        IncidentType::LandslideRoadBlock,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IncidentType::FloodWaterRising => "Flood - Water Rising",
            IncidentType::BuildingCollapse => "Building Collapse",
            IncidentType::FireEmergency => "Fire Emergency",
            IncidentType::MedicalCritical => "Medical - Critical",
            IncidentType::LandslideRoadBlock => "Landslide / Road Block",
        }
    }
}

impl std::fmt::Display for IncidentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for IncidentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        IncidentType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let accepted: Vec<&str> = IncidentType::ALL.iter().map(|t| t.label()).collect();
                format!(
                    "Unknown incident type '{}', expected one of: {}",
                    wanted,
                    accepted.join(", ")
                )
            })
    }
}

/// Report status. Only the initial state exists; nothing transitions it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status")]
pub enum ReportStatus {
    #[default]
    Pending,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "Pending"),
        }
    }
}

/// Database model for report
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub user_id: String,
    pub user_name: Option<String>,
    pub user_photo: Option<String>,
    pub incident_type: IncidentType,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated data for inserting a new report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub user_id: String,
    pub user_name: Option<String>,
    pub user_photo: Option<String>,
    pub incident_type: IncidentType,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
}

impl CreateReport {
    /// Build the stored record with server-assigned fields
    pub fn into_report(self, id: Uuid, created_at: DateTime<Utc>) -> Report {
        Report {
            id,
            user_id: self.user_id,
            user_name: self.user_name,
            user_photo: self.user_photo,
            incident_type: self.incident_type,
            description: self.description,
            lat: self.lat,
            lng: self.lng,
            status: ReportStatus::default(),
            created_at,
        }
    }
}
