//! Client state container and reducer.
//!
//! `AppState::reduce` is the only place state changes. It never performs I/O;
//! instead it returns an [`Effect`] for the controller to run, whose outcome
//! comes back as another [`Action`].

use crate::client::location::{Coordinate, LocationError, LocationRequest};
use crate::client::map::{MapView, PrecisionPin};
use crate::client::session::{Identity, Session};
use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
use crate::features::reports::models::IncidentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Map,
    Report,
}

/// Where the submission flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    AcquiringLocation,
    LocationLocked,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportForm {
    pub incident_type: IncidentType,
    pub description: String,
    pub location: Option<Coordinate>,
}

/// User-facing message produced by the flow
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    LocationUnavailable(LocationError),
    MissingLocation,
    Submitted,
    SubmitFailed(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::LocationUnavailable(err) => {
                format!("GPS Error: {}. Please enable High Accuracy.", err)
            }
            Notice::MissingLocation => "Location is missing!".to_string(),
            Notice::Submitted => "REPORT SUBMITTED! Help is on the way.".to_string(),
            Notice::SubmitFailed(_) => "Failed to submit.".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Submitted)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SignedIn(Identity),
    SignedOut,
    ReportsLoaded(Vec<ReportResponseDto>),
    ReportsFailed(String),
    ShowView(View),
    SelectType(IncidentType),
    EditDescription(String),
    RequestLocation,
    LocationAcquired(Coordinate),
    LocationFailed(LocationError),
    PinDragged(Coordinate),
    Submit,
    SubmitSucceeded(ReportResponseDto),
    SubmitFailed(String),
    DismissNotice,
}

/// Side effect requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchReports,
    AcquireLocation(LocationRequest),
    SubmitReport(CreateReportDto),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub session: Session,
    pub view: View,
    pub phase: SubmissionPhase,
    pub form: ReportForm,
    pub reports: Vec<ReportResponseDto>,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn reduce(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SignedIn(identity) => {
                self.session = Session::SignedIn(identity);
                Some(Effect::FetchReports)
            }
            Action::SignedOut => {
                *self = AppState::default();
                None
            }
            Action::ReportsLoaded(reports) => {
                self.reports = reports;
                None
            }
            Action::ReportsFailed(err) => {
                tracing::warn!("Keeping previous report list after fetch failure: {}", err);
                None
            }
            Action::ShowView(view) => {
                self.view = view;
                None
            }
            Action::SelectType(incident_type) => {
                self.form.incident_type = incident_type;
                None
            }
            Action::EditDescription(description) => {
                self.form.description = description;
                None
            }
            Action::RequestLocation => match self.phase {
                SubmissionPhase::Idle | SubmissionPhase::LocationLocked => {
                    self.phase = SubmissionPhase::AcquiringLocation;
                    Some(Effect::AcquireLocation(LocationRequest::high_accuracy()))
                }
                SubmissionPhase::AcquiringLocation | SubmissionPhase::Submitting => None,
            },
            Action::LocationAcquired(coordinate) => {
                if self.phase == SubmissionPhase::AcquiringLocation {
                    self.form.location = Some(coordinate);
                    self.phase = SubmissionPhase::LocationLocked;
                }
                None
            }
            Action::LocationFailed(err) => {
                if self.phase == SubmissionPhase::AcquiringLocation {
                    // A failed re-calibration keeps the pin already placed
                    self.phase = if self.form.location.is_some() {
                        SubmissionPhase::LocationLocked
                    } else {
                        SubmissionPhase::Idle
                    };
                    self.notice = Some(Notice::LocationUnavailable(err));
                }
                None
            }
            Action::PinDragged(coordinate) => {
                if self.phase == SubmissionPhase::LocationLocked && coordinate.is_valid() {
                    self.form.location = Some(coordinate);
                }
                None
            }
            Action::Submit => self.begin_submit(),
            Action::SubmitSucceeded(report) => {
                if self.phase != SubmissionPhase::Submitting {
                    return None;
                }
                tracing::info!("Report {} accepted", report.id);
                self.form = ReportForm::default();
                self.phase = SubmissionPhase::Idle;
                self.view = View::Map;
                self.notice = Some(Notice::Submitted);
                Some(Effect::FetchReports)
            }
            Action::SubmitFailed(err) => {
                if self.phase == SubmissionPhase::Submitting {
                    tracing::error!("Report submission failed: {}", err);
                    self.phase = SubmissionPhase::LocationLocked;
                    self.notice = Some(Notice::SubmitFailed(err));
                }
                None
            }
            Action::DismissNotice => {
                self.notice = None;
                None
            }
        }
    }

    fn begin_submit(&mut self) -> Option<Effect> {
        if matches!(
            self.phase,
            SubmissionPhase::Submitting | SubmissionPhase::AcquiringLocation
        ) {
            return None;
        }

        let identity = self.session.identity()?.clone();

        let Some(location) = self.form.location else {
            self.notice = Some(Notice::MissingLocation);
            return None;
        };

        self.phase = SubmissionPhase::Submitting;
        Some(Effect::SubmitReport(CreateReportDto {
            incident_type: self.form.incident_type,
            description: self.form.description.clone(),
            lat: location.lat,
            lng: location.lng,
            user_id: identity.uid,
            user_name: identity.display_name,
            user_photo: identity.photo_url,
        }))
    }

    /// Map of every known report
    pub fn live_map(&self) -> MapView {
        MapView::live_grid(&self.reports)
    }

    /// Draggable pin on the form, once a location is locked
    pub fn precision_pin(&self) -> Option<PrecisionPin> {
        self.form.location.map(PrecisionPin::new)
    }
}
