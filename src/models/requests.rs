use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{SortOrder, Venue};

/// Request to find nearby venues
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindVenuesRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(alias = "min_savings", rename = "minSavings")]
    pub min_savings: Option<f64>,
    #[serde(alias = "active_only", rename = "activeOnly", default)]
    pub active_only: bool,
    #[serde(default)]
    pub sort: SortOrder,
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
    /// Evaluation instant, defaults to the current time
    #[serde(default)]
    pub now: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub venues: Vec<Venue>,
}

/// Request to evaluate a single happy hour window
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DealStatusRequest {
    #[serde(alias = "valid_days", rename = "validDays")]
    pub valid_days: String,
    #[serde(alias = "start_time", rename = "startTime")]
    pub start_time: String,
    #[serde(alias = "end_time", rename = "endTime")]
    pub end_time: String,
    #[serde(default)]
    pub now: Option<DateTime<FixedOffset>>,
}

/// Query parameters for a point-to-point distance
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DistanceQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat1: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon1: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat2: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon2: f64,
}
