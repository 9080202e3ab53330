//! Device location acquisition.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = String;

    /// Parses `"lat,lng"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("Expected 'LAT,LNG', got '{}'", s))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid latitude '{}': {}", lat.trim(), e))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid longitude '{}': {}", lng.trim(), e))?;

        let coordinate = Coordinate::new(lat, lng);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(format!("Coordinate out of range: {}", coordinate))
        }
    }
}

/// Options for a one-shot position request
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRequest {
    /// Prefer satellite positioning over network estimates
    pub enable_high_accuracy: bool,
    /// Upper bound on the wait for a fix
    pub timeout: Duration,
    /// Oldest cached position that may be returned
    pub maximum_age: Duration,
}

impl LocationRequest {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

    /// Fresh satellite fix, waiting up to 20 seconds
    pub fn high_accuracy() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Self::DEFAULT_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self::high_accuracy()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Timed out waiting for a position fix")]
    Timeout,

    #[error("Geolocation is not supported")]
    Unsupported,
}

/// Source of device positions
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self, request: &LocationRequest)
        -> Result<Coordinate, LocationError>;
}

/// Request a single position, bounded by the request timeout
pub async fn acquire(
    provider: &dyn LocationProvider,
    request: &LocationRequest,
) -> Result<Coordinate, LocationError> {
    let coordinate = tokio::time::timeout(request.timeout, provider.current_position(request))
        .await
        .map_err(|_| LocationError::Timeout)??;

    if !coordinate.is_valid() {
        return Err(LocationError::PositionUnavailable(format!(
            "sensor returned an invalid coordinate ({}, {})",
            coordinate.lat, coordinate.lng
        )));
    }

    Ok(coordinate)
}

/// Provider that reports a fixed position, or none at all
#[derive(Debug, Clone, Default)]
pub struct FixedLocationProvider {
    coordinate: Option<Coordinate>,
}

impl FixedLocationProvider {
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_position(
        &self,
        _request: &LocationRequest,
    ) -> Result<Coordinate, LocationError> {
        self.coordinate.ok_or(LocationError::Unsupported)
    }
}
