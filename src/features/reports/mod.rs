//! Incident reports feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/reports` | No | List all reports, newest first |
//! | POST | `/api/reports` | No | Submit a geotagged report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::ReportService;
pub use stores::{MemoryReportStore, PgReportStore, ReportStore};
