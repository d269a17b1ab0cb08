use serde::{Deserialize, Serialize};
use crate::models::domain::{DealStatus, ScoredVenue};

/// Response for find venues endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindVenuesResponse {
    pub venues: Vec<ScoredVenue>,
    pub total_results: usize,
    pub evaluated_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Response for deal status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealStatusResponse {
    pub active: bool,
    pub status: DealStatus,
}

/// Response for distance endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
    pub label: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
