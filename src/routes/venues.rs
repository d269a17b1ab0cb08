use actix_web::{web, HttpResponse};
use chrono::{DateTime, FixedOffset, Utc};
use validator::Validate;

use crate::config::SearchSettings;
use crate::core::{
    distance::{format_distance, haversine_distance, round_to},
    schedule::deal_status,
    VenueFinder,
};
use crate::error::ApiError;
use crate::models::{
    DealStatus, DealStatusRequest, DealStatusResponse, DistanceQuery, DistanceResponse,
    FindVenuesRequest, FindVenuesResponse, GeoPoint, HealthResponse, TimeWindow, VenueQuery,
};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub finder: VenueFinder,
    /// Reference timezone for happy hour evaluation
    pub offset: FixedOffset,
    pub search: SearchSettings,
}

impl AppState {
    /// Evaluation instant: the requested one or the current time, in the reference zone
    fn evaluation_time(&self, requested: Option<DateTime<FixedOffset>>) -> DateTime<FixedOffset> {
        requested
            .unwrap_or_else(|| Utc::now().fixed_offset())
            .with_timezone(&self.offset)
    }
}

/// Configure all venue and deal routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/venues/nearby", web::post().to(find_venues))
        .route("/deals/status", web::post().to(evaluate_deal))
        .route("/distance", web::get().to(distance));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Find nearby venues endpoint
///
/// POST /api/v1/venues/nearby
///
/// Request body:
/// ```json
/// {
///   "latitude": 1.2834,
///   "longitude": 103.8607,
///   "radiusKm": 5,
///   "category": "beer",
///   "minSavings": 20,
///   "activeOnly": true,
///   "sort": "distance|heat",
///   "limit": 20,
///   "now": "2024-05-15T18:30:00+08:00",
///   "venues": [ ... ]
/// }
/// ```
async fn find_venues(
    state: web::Data<AppState>,
    req: web::Json<FindVenuesRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_venues request: field_errors={:?}", errors);
        return Err(errors.into());
    }

    let req = req.into_inner();
    let radius_km = req.radius_km.unwrap_or(state.search.default_radius_km);
    if radius_km > state.search.max_radius_km {
        return Err(ApiError::BadRequest(format!(
            "radiusKm must not exceed {}",
            state.search.max_radius_km
        )));
    }

    let limit = req
        .limit
        .unwrap_or(state.search.default_limit)
        .min(state.search.max_limit) as usize;
    let now = state.evaluation_time(req.now);

    let query = VenueQuery {
        origin: GeoPoint::new(req.latitude, req.longitude),
        radius_km,
        category: req.category.filter(|c| !c.trim().is_empty()),
        min_savings: req.min_savings,
        active_only: req.active_only,
        sort: req.sort,
        limit,
    };

    tracing::info!(
        "Finding venues within {}km of ({}, {}), limit: {}",
        radius_km,
        req.latitude,
        req.longitude,
        limit
    );

    let result = state.finder.find_venues(&query, req.venues, &now);

    let response = FindVenuesResponse {
        total_results: result.venues.len(),
        venues: result.venues,
        evaluated_at: now,
    };

    tracing::info!(
        "Returning {} venues (from {} candidates)",
        response.total_results,
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Evaluate a single happy hour window
///
/// POST /api/v1/deals/status
async fn evaluate_deal(
    state: web::Data<AppState>,
    req: web::Json<DealStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let req = req.into_inner();
    let now = state.evaluation_time(req.now);
    let window = TimeWindow {
        valid_days: req.valid_days,
        start_time: req.start_time,
        end_time: req.end_time,
    };

    let status = deal_status(&window, &now);

    Ok(HttpResponse::Ok().json(DealStatusResponse {
        active: status == DealStatus::Active,
        status,
    }))
}

/// Distance between two points
///
/// GET /api/v1/distance?lat1=..&lon1=..&lat2=..&lon2=..
async fn distance(query: web::Query<DistanceQuery>) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let distance_km = haversine_distance(query.lat1, query.lon1, query.lat2, query.lon2);

    Ok(HttpResponse::Ok().json(DistanceResponse {
        distance_km: round_to(distance_km, 2),
        label: format_distance(distance_km),
    }))
}
