use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Recurring happy hour window exactly as stored on a deal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(rename = "validDays")]
    pub valid_days: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

/// The part of a deal the heat scorer looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DealSignal {
    pub savings_percentage: f64,
}

/// Popularity label shown next to the heat meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatLabel {
    New,
    Regular,
    Trending,
    Popular,
    #[serde(rename = "Very Popular")]
    VeryPopular,
    #[serde(rename = "Hot Spot!")]
    HotSpot,
}

impl fmt::Display for HeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HeatLabel::New => "New",
            HeatLabel::Regular => "Regular",
            HeatLabel::Trending => "Trending",
            HeatLabel::Popular => "Popular",
            HeatLabel::VeryPopular => "Very Popular",
            HeatLabel::HotSpot => "Hot Spot!",
        };
        f.write_str(label)
    }
}

/// Venue heat, 0-10
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatScore {
    pub level: f64,
    pub label: HeatLabel,
}

/// Heat scoring constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatWeights {
    /// Savings percentage at which a deal counts as "good"
    pub good_deal_savings_pct: f64,
    pub deals_per_point: f64,
    pub max_volume_points: f64,
    pub max_discount_points: f64,
}

impl Default for HeatWeights {
    fn default() -> Self {
        Self {
            good_deal_savings_pct: 20.0,
            deals_per_point: 2.0,
            max_volume_points: 5.0,
            max_discount_points: 5.0,
        }
    }
}

/// A drink deal offered by a venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "savingsPercentage", default)]
    pub savings_percentage: f64,
    #[serde(flatten)]
    pub window: TimeWindow,
}

impl Deal {
    pub fn signal(&self) -> DealSignal {
        DealSignal {
            savings_percentage: self.savings_percentage,
        }
    }
}

/// Bar or restaurant with its listed deals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub deals: Vec<Deal>,
    /// Curated heat level that overrides the calculated one
    #[serde(rename = "heatLevel", default)]
    pub heat_level: Option<f64>,
}

/// Badge status of a deal at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Active,
    Upcoming,
    Inactive,
}

/// Deal with its evaluated status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealView {
    #[serde(flatten)]
    pub deal: Deal,
    pub status: DealStatus,
}

/// Venue result with distance and heat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredVenue {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "distanceLabel")]
    pub distance_label: String,
    pub heat: HeatScore,
    #[serde(rename = "activeDeals")]
    pub active_deals: usize,
    pub deals: Vec<DealView>,
}

/// Result ordering for venue search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Distance,
    Heat,
}

/// Venue search parameters
#[derive(Debug, Clone)]
pub struct VenueQuery {
    pub origin: GeoPoint,
    pub radius_km: f64,
    pub category: Option<String>,
    pub min_savings: Option<f64>,
    pub active_only: bool,
    pub sort: SortOrder,
    pub limit: usize,
}

impl VenueQuery {
    /// True when any deal-level filter is set
    pub fn filters_deals(&self) -> bool {
        self.category.is_some() || self.min_savings.is_some() || self.active_only
    }
}
