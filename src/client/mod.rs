//! Reporting client: API access, location, submission flow and map view.

pub mod api;
pub mod controller;
pub mod location;
pub mod map;
pub mod session;
pub mod state;

pub use api::{ClientError, HttpReportsApi, ReportsApi};
pub use controller::Controller;
pub use location::{Coordinate, FixedLocationProvider, LocationError, LocationProvider};
pub use session::Identity;
pub use state::{Action, AppState, Notice, SubmissionPhase, View};
