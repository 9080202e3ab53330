use std::sync::Arc;

use crate::client::api::ReportsApi;
use crate::client::location::{self, LocationProvider};
use crate::client::state::{Action, AppState, Effect};

/// Drives [`AppState`] by running the effects its reducer asks for
pub struct Controller {
    state: AppState,
    api: Arc<dyn ReportsApi>,
    locator: Arc<dyn LocationProvider>,
}

impl Controller {
    pub fn new(api: Arc<dyn ReportsApi>, locator: Arc<dyn LocationProvider>) -> Self {
        Self {
            state: AppState::default(),
            api,
            locator,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action and every follow-up action its effects produce
    pub async fn dispatch(&mut self, action: Action) {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            if let Some(effect) = self.state.reduce(action) {
                next = Some(self.run(effect).await);
            }
        }
    }

    async fn run(&self, effect: Effect) -> Action {
        match effect {
            Effect::FetchReports => match self.api.list_reports().await {
                Ok(reports) => {
                    tracing::debug!("Loaded {} reports", reports.len());
                    Action::ReportsLoaded(reports)
                }
                Err(e) => {
                    tracing::error!("API Error: {}", e);
                    Action::ReportsFailed(e.to_string())
                }
            },
            Effect::AcquireLocation(request) => {
                match location::acquire(self.locator.as_ref(), &request).await {
                    Ok(coordinate) => Action::LocationAcquired(coordinate),
                    Err(e) => {
                        tracing::warn!("Location acquisition failed: {}", e);
                        Action::LocationFailed(e)
                    }
                }
            }
            Effect::SubmitReport(report) => match self.api.create_report(&report).await {
                Ok(created) => Action::SubmitSucceeded(created),
                Err(e) => Action::SubmitFailed(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    use crate::client::api::ClientError;
    use crate::client::location::{Coordinate, FixedLocationProvider, LocationError};
    use crate::client::session::Identity;
    use crate::client::state::{Notice, SubmissionPhase, View};
    use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
    use crate::features::reports::models::{IncidentType, ReportStatus};

    /// In-memory API that records every call
    #[derive(Default)]
    struct RecordingApi {
        reports: Mutex<Vec<ReportResponseDto>>,
        list_calls: AtomicUsize,
        create_calls: AtomicUsize,
        fail_creates: bool,
    }

    #[async_trait]
    impl ReportsApi for RecordingApi {
        async fn list_reports(&self) -> Result<Vec<ReportResponseDto>, ClientError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reports.lock().await.clone())
        }

        async fn create_report(
            &self,
            report: &CreateReportDto,
        ) -> Result<ReportResponseDto, ClientError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_creates {
                return Err(ClientError::Decode("store offline".to_string()));
            }
            let created = ReportResponseDto {
                id: Uuid::now_v7(),
                user_id: report.user_id.clone(),
                user_name: report.user_name.clone(),
                user_photo: report.user_photo.clone(),
                incident_type: report.incident_type,
                description: report.description.clone(),
                lat: report.lat,
                lng: report.lng,
                status: ReportStatus::Pending,
                timestamp: Utc::now(),
            };
            self.reports.lock().await.insert(0, created.clone());
            Ok(created)
        }
    }

    fn identity() -> Identity {
        Identity {
            uid: "uid-9".to_string(),
            display_name: Some("Kabir".to_string()),
            photo_url: None,
        }
    }

    fn controller(api: Arc<RecordingApi>, fix: Option<Coordinate>) -> Controller {
        Controller::new(api, Arc::new(FixedLocationProvider::new(fix)))
    }

    #[tokio::test]
    async fn test_sign_in_fetches_reports() {
        let api = Arc::new(RecordingApi::default());
        let mut controller = controller(api.clone(), None);

        controller.dispatch(Action::SignedIn(identity())).await;

        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
        assert!(controller.state().reports.is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_location_makes_no_network_call() {
        let api = Arc::new(RecordingApi::default());
        let mut controller = controller(api.clone(), None);

        controller.dispatch(Action::SignedIn(identity())).await;
        controller.dispatch(Action::Submit).await;

        assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.state().notice, Some(Notice::MissingLocation));
    }

    #[tokio::test]
    async fn test_location_unavailable_notifies_and_idles() {
        let api = Arc::new(RecordingApi::default());
        let mut controller = controller(api, None);

        controller.dispatch(Action::SignedIn(identity())).await;
        controller.dispatch(Action::RequestLocation).await;

        assert_eq!(controller.state().phase, SubmissionPhase::Idle);
        assert_eq!(
            controller.state().notice,
            Some(Notice::LocationUnavailable(LocationError::Unsupported))
        );
    }

    #[tokio::test]
    async fn test_full_submission_flow_refetches() {
        let api = Arc::new(RecordingApi::default());
        let mut controller = controller(api.clone(), Some(Coordinate::new(12.9, 77.6)));

        controller.dispatch(Action::SignedIn(identity())).await;
        controller.dispatch(Action::ShowView(View::Report)).await;
        controller
            .dispatch(Action::SelectType(IncidentType::FireEmergency))
            .await;
        controller
            .dispatch(Action::EditDescription("x".to_string()))
            .await;
        controller.dispatch(Action::RequestLocation).await;
        assert_eq!(controller.state().phase, SubmissionPhase::LocationLocked);

        controller
            .dispatch(Action::PinDragged(Coordinate::new(12.91, 77.61)))
            .await;
        controller.dispatch(Action::Submit).await;

        let state = controller.state();
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.phase, SubmissionPhase::Idle);
        assert_eq!(state.view, View::Map);
        assert_eq!(state.notice, Some(Notice::Submitted));
        assert_eq!(state.reports.len(), 1);
        assert_eq!(state.reports[0].lat, 12.91);
        assert_eq!(state.reports[0].lng, 77.61);
        assert_eq!(state.reports[0].incident_type, IncidentType::FireEmergency);
        assert_eq!(state.live_map().markers.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_form_and_skips_refetch() {
        let api = Arc::new(RecordingApi {
            fail_creates: true,
            ..Default::default()
        });
        let mut controller = controller(api.clone(), Some(Coordinate::new(12.9, 77.6)));

        controller.dispatch(Action::SignedIn(identity())).await;
        controller.dispatch(Action::RequestLocation).await;
        controller.dispatch(Action::Submit).await;

        let state = controller.state();
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.phase, SubmissionPhase::LocationLocked);
        assert_eq!(state.form.location, Some(Coordinate::new(12.9, 77.6)));
        assert!(matches!(state.notice, Some(Notice::SubmitFailed(_))));
    }
}
