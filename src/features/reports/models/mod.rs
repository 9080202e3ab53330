mod report;

pub use report::{CreateReport, IncidentType, Report, ReportStatus};
