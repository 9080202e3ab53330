use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
///
/// Both routes are public; identity fields travel in the request body.
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::Utc;
    use serde_json::json;

    use crate::features::reports::dtos::ReportResponseDto;
    use crate::features::reports::models::{IncidentType, ReportStatus};
    use crate::features::reports::stores::{MemoryReportStore, ReportStore};
    use crate::shared::test_helpers::{
        fake_report_dto, ReadOnlyReportStore, UnreachableReportStore,
    };

    fn server_with(store: Arc<dyn ReportStore>) -> TestServer {
        let service = Arc::new(ReportService::new(store));
        TestServer::new(routes(service)).unwrap()
    }

    fn memory_server() -> TestServer {
        server_with(Arc::new(MemoryReportStore::new()))
    }

    #[tokio::test]
    async fn test_list_empty() {
        let server = memory_server();
        let response = server.get("/api/reports").await;
        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_create_fire_emergency() {
        let server = memory_server();
        let before = Utc::now();

        let response = server
            .post("/api/reports")
            .json(&json!({
                "type": "Fire Emergency",
                "description": "x",
                "lat": 12.9,
                "lng": 77.6,
                "userId": "uid-42",
                "userName": "Ravi",
                "userPhoto": "https://example.com/ravi.png"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: ReportResponseDto = response.json();
        assert_eq!(created.incident_type, IncidentType::FireEmergency);
        assert_eq!(created.description, "x");
        assert_eq!(created.lat, 12.9);
        assert_eq!(created.lng, 77.6);
        assert_eq!(created.status, ReportStatus::Pending);
        assert!(created.timestamp >= before);

        let listed: Vec<ReportResponseDto> = server.get("/api/reports").await.json();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_sequential_creates_list_newest_first() {
        let server = memory_server();

        let first: ReportResponseDto = server
            .post("/api/reports")
            .json(&fake_report_dto())
            .await
            .json();
        let second: ReportResponseDto = server
            .post("/api/reports")
            .json(&fake_report_dto())
            .await
            .json();

        let listed: Vec<ReportResponseDto> = server.get("/api/reports").await.json();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_fields() {
        let server = memory_server();
        let response = server
            .post("/api/reports")
            .json(&json!({
                "type": "Fire Emergency",
                "description": "x",
                "lat": 12.9,
                "lng": 77.6,
                "userId": "uid-42",
                "status": "Resolved"
            }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);

        let listed: Vec<ReportResponseDto> = server.get("/api/reports").await.json();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_location() {
        let server = memory_server();
        let response = server
            .post("/api/reports")
            .json(&json!({
                "type": "Building Collapse",
                "description": "x",
                "lat": null,
                "lng": null,
                "userId": "uid-42"
            }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_coordinates() {
        let server = memory_server();
        let response = server
            .post("/api/reports")
            .json(&json!({
                "type": "Building Collapse",
                "description": "x",
                "lat": 12.9,
                "lng": 200.0,
                "userId": "uid-42"
            }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["errors"][0].as_str().unwrap().contains("Longitude"));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_incident_type() {
        let server = memory_server();
        let response = server
            .post("/api/reports")
            .json(&json!({
                "type": "Flood",
                "description": "x",
                "lat": 12.9,
                "lng": 77.6,
                "userId": "uid-42"
            }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_unreachable_returns_server_error() {
        let server = server_with(Arc::new(UnreachableReportStore));

        let response = server
            .post("/api/reports")
            .json(&fake_report_dto())
            .expect_failure()
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Database error occurred");

        server
            .get("/api/reports")
            .expect_failure()
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_nothing_listed() {
        let server = server_with(Arc::new(ReadOnlyReportStore::default()));

        server
            .post("/api/reports")
            .json(&fake_report_dto())
            .expect_failure()
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let response = server.get("/api/reports").await;
        response.assert_status_ok();
        let reports: Vec<ReportResponseDto> = response.json();
        assert!(reports.is_empty());
    }
}
