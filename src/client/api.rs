use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Server { status: StatusCode, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Error envelope returned by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Report endpoints as seen from the client
#[async_trait]
pub trait ReportsApi: Send + Sync {
    async fn list_reports(&self) -> Result<Vec<ReportResponseDto>, ClientError>;

    async fn create_report(&self, report: &CreateReportDto)
        -> Result<ReportResponseDto, ClientError>;
}

/// HTTP client for the AapdaMitra server
pub struct HttpReportsApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpReportsApi {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("aapda/", env!("CARGO_PKG_VERSION")))
            .timeout(Self::REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn reports_url(&self) -> String {
        format!("{}/api/reports", self.base_url)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                tracing::error!("Failed to parse server response: {}", e);
                ClientError::Decode(e.to_string())
            });
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read error body ({}): {}", status, e);
            ClientError::Network(e)
        })?;
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);

        tracing::error!("Server error {}: {}", status, message);
        Err(ClientError::Server { status, message })
    }
}

#[async_trait]
impl ReportsApi for HttpReportsApi {
    async fn list_reports(&self) -> Result<Vec<ReportResponseDto>, ClientError> {
        let url = self.reports_url();
        tracing::debug!("Fetching reports from {}", url);

        let response = self.http_client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn create_report(
        &self,
        report: &CreateReportDto,
    ) -> Result<ReportResponseDto, ClientError> {
        let url = self.reports_url();
        tracing::debug!("Submitting {} report to {}", report.incident_type, url);

        let response = self.http_client.post(&url).json(report).send().await?;
        Self::decode(response).await
    }
}
