use utoipa::{Modify, OpenApi};

use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::create_report,
    ),
    components(
        schemas(
            // Reports
            reports_dtos::CreateReportDto,
            reports_dtos::ReportResponseDto,
            reports_models::IncidentType,
            reports_models::ReportStatus,
        )
    ),
    tags(
        (name = "reports", description = "Geotagged incident reports")
    )
)]
pub struct ApiDoc;

/// Overrides the document info block from configuration
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_report_routes() {
        let doc = ApiDoc::openapi();
        let path = doc.paths.paths.get("/api/reports").expect("reports path");
        assert!(path.get.is_some());
        assert!(path.post.is_some());
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "AapdaMitra".to_string(),
            version: "9.9.9".to_string(),
            description: "test".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "AapdaMitra");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
