//! Map view model: markers, popups and the precision pin.
//!
//! Tile rendering is left to whatever front-end draws these.

use std::fmt;

use chrono::{Local, TimeZone};
use uuid::Uuid;

use crate::client::location::Coordinate;
use crate::features::reports::dtos::ReportResponseDto;

pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap";

/// Centre of India
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(20.5937, 78.9629);
pub const DEFAULT_ZOOM: u8 = 5;
pub const PRECISION_ZOOM: u8 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub time: String,
    pub description: String,
    pub coordinates: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub report_id: Uuid,
    pub position: Coordinate,
    pub popup: Popup,
}

impl MapMarker {
    pub fn for_report<Tz>(report: &ReportResponseDto, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            report_id: report.id,
            position: Coordinate::new(report.lat, report.lng),
            popup: Popup {
                title: report.incident_type.label().to_uppercase(),
                time: report
                    .timestamp
                    .with_timezone(tz)
                    .format("%H:%M:%S")
                    .to_string(),
                description: report.description.clone(),
                coordinates: format!("Lat: {:.4} | Lng: {:.4}", report.lat, report.lng),
            },
        }
    }
}

impl fmt::Display for MapMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.popup.title, self.popup.time)?;
        if !self.popup.description.is_empty() {
            writeln!(f, "  {}", self.popup.description)?;
        }
        write!(f, "  {}", self.popup.coordinates)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    /// One marker per report, in local time
    pub fn live_grid(reports: &[ReportResponseDto]) -> Self {
        Self::live_grid_in(reports, &Local)
    }

    pub fn live_grid_in<Tz>(reports: &[ReportResponseDto], tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            markers: reports
                .iter()
                .map(|report| MapMarker::for_report(report, tz))
                .collect(),
        }
    }
}

/// Draggable pin shown on the report form after a location lock
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionPin {
    pub position: Coordinate,
    pub zoom: u8,
}

impl PrecisionPin {
    pub const HINT: &'static str = "Drag me to exact location";

    pub fn new(position: Coordinate) -> Self {
        Self {
            position,
            zoom: PRECISION_ZOOM,
        }
    }

    /// Pin readout with six decimals
    pub fn label(&self) -> String {
        self.position.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::features::reports::models::{IncidentType, ReportStatus};

    fn report(lat: f64, lng: f64, description: &str) -> ReportResponseDto {
        ReportResponseDto {
            id: Uuid::now_v7(),
            user_id: "uid".to_string(),
            user_name: None,
            user_photo: None,
            incident_type: IncidentType::LandslideRoadBlock,
            description: description.to_string(),
            lat,
            lng,
            status: ReportStatus::Pending,
            timestamp: Utc.with_ymd_and_hms(2025, 8, 14, 6, 5, 9).unwrap(),
        }
    }

    #[test]
    fn test_live_grid_defaults() {
        let view = MapView::live_grid_in(&[], &Utc);
        assert_eq!(view.center, DEFAULT_CENTER);
        assert_eq!(view.zoom, 5);
        assert!(view.markers.is_empty());
    }

    #[test]
    fn test_marker_popup() {
        let view = MapView::live_grid_in(&[report(30.316_49, 78.032_19, "road blocked")], &Utc);
        let marker = &view.markers[0];

        assert_eq!(marker.position, Coordinate::new(30.316_49, 78.032_19));
        assert_eq!(marker.popup.title, "LANDSLIDE / ROAD BLOCK");
        assert_eq!(marker.popup.time, "06:05:09");
        assert_eq!(marker.popup.description, "road blocked");
        assert_eq!(marker.popup.coordinates, "Lat: 30.3165 | Lng: 78.0322");
    }

    #[test]
    fn test_marker_per_report_in_order() {
        let reports = vec![report(1.0, 1.0, "a"), report(2.0, 2.0, "b")];
        let view = MapView::live_grid_in(&reports, &Utc);
        let ids: Vec<Uuid> = view.markers.iter().map(|m| m.report_id).collect();
        assert_eq!(ids, vec![reports[0].id, reports[1].id]);
    }

    #[test]
    fn test_marker_display_skips_empty_description() {
        let marker = MapMarker::for_report(&report(12.9, 77.6, ""), &Utc);
        assert_eq!(
            marker.to_string(),
            "[LANDSLIDE / ROAD BLOCK] 06:05:09\n  Lat: 12.9000 | Lng: 77.6000"
        );
    }

    #[test]
    fn test_precision_pin() {
        let pin = PrecisionPin::new(Coordinate::new(12.9716, 77.5946));
        assert_eq!(pin.zoom, PRECISION_ZOOM);
        assert_eq!(pin.label(), "12.971600, 77.594600");
    }
}
