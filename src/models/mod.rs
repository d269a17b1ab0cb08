// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, Deal, DealSignal, DealStatus, DealView, GeoPoint, HeatLabel, HeatScore,
    HeatWeights, ScoredVenue, SortOrder, TimeWindow, Venue, VenueQuery,
};
pub use requests::{DealStatusRequest, DistanceQuery, FindVenuesRequest};
pub use responses::{
    DealStatusResponse, DistanceResponse, ErrorResponse, FindVenuesResponse, HealthResponse,
};
