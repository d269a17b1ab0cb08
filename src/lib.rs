//! Happy Hour Algo - distance, schedule and heat calculations for the happy hour deals app
//!
//! The three calculators in [`core`] are pure functions: Haversine distance with a
//! bounding box pre-filter, the "is this happy hour active now" evaluator, and the
//! venue heat scorer. The HTTP layer in [`routes`] is thin glue around them.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{
    VenueFinder,
    distance::{haversine_distance, calculate_bounding_box},
    heat::heat_score,
    schedule::{is_within_window, deal_status},
};
pub use models::{GeoPoint, TimeWindow, DealSignal, HeatScore, HeatLabel, Venue, ScoredVenue, FindVenuesRequest, FindVenuesResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let bbox = calculate_bounding_box(1.3521, 103.8198, 5.0);
        assert!(bbox.min_lat < 1.3521);
        assert_eq!(heat_score(&[], None).label, HeatLabel::New);
    }
}
