use crate::models::{BoundingBox, Deal, DealStatus, Venue, VenueQuery};

/// Check if a venue lies inside the search area
///
/// Stage 1 is the cheap bounding box test, stage 2 the exact radius cutoff.
/// Returns the unrounded distance for venues that pass.
#[inline]
pub fn venue_within_radius(venue: &Venue, query: &VenueQuery, bbox: &BoundingBox) -> Option<f64> {
    if !super::distance::is_within_bounding_box(venue.latitude, venue.longitude, bbox) {
        return None;
    }

    let distance_km = super::distance::haversine_distance(
        query.origin.latitude,
        query.origin.longitude,
        venue.latitude,
        venue.longitude,
    );

    (distance_km <= query.radius_km).then_some(distance_km)
}

/// Check a deal against the query's category and savings filters
///
/// A deal without its own category inherits the venue's.
#[inline]
pub fn matches_deal_filters(deal: &Deal, venue: &Venue, query: &VenueQuery) -> bool {
    if let Some(wanted) = query.category.as_deref() {
        let category = deal.category.as_deref().or(venue.category.as_deref());
        match category {
            Some(c) if c.trim().eq_ignore_ascii_case(wanted.trim()) => {}
            _ => return false,
        }
    }

    if let Some(min_savings) = query.min_savings {
        if deal.savings_percentage < min_savings {
            return false;
        }
    }

    true
}

/// Check a deal's evaluated status against the `active_only` flag
#[inline]
pub fn matches_status_filter(status: DealStatus, query: &VenueQuery) -> bool {
    !query.active_only || status == DealStatus::Active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::calculate_bounding_box;
    use crate::models::{GeoPoint, SortOrder, TimeWindow};

    fn create_test_deal(category: Option<&str>, savings: f64) -> Deal {
        Deal {
            id: "d1".to_string(),
            title: "1-for-1 Pints".to_string(),
            category: category.map(str::to_string),
            savings_percentage: savings,
            window: TimeWindow {
                valid_days: "Daily".to_string(),
                start_time: "17:00".to_string(),
                end_time: "20:00".to_string(),
            },
        }
    }

    fn create_test_venue(lat: f64, lng: f64) -> Venue {
        Venue {
            id: "v1".to_string(),
            name: "Test Bar".to_string(),
            category: Some("Beer".to_string()),
            latitude: lat,
            longitude: lng,
            deals: vec![],
            heat_level: None,
        }
    }

    fn create_test_query() -> VenueQuery {
        VenueQuery {
            origin: GeoPoint::new(1.2834, 103.8607),
            radius_km: 5.0,
            category: None,
            min_savings: None,
            active_only: false,
            sort: SortOrder::Distance,
            limit: 20,
        }
    }

    #[test]
    fn test_venue_within_radius() {
        let query = create_test_query();
        let bbox = calculate_bounding_box(query.origin.latitude, query.origin.longitude, query.radius_km);

        let near = create_test_venue(1.2850, 103.8550);
        let distance = venue_within_radius(&near, &query, &bbox);
        assert!(distance.is_some_and(|d| d < 1.0));

        // Changi is ~17 km away
        let far = create_test_venue(1.3644, 103.9915);
        assert!(venue_within_radius(&far, &query, &bbox).is_none());
    }

    #[test]
    fn test_bbox_corner_outside_radius() {
        let query = create_test_query();
        let bbox = calculate_bounding_box(query.origin.latitude, query.origin.longitude, query.radius_km);

        // Inside the square but ~6.4 km away diagonally
        let corner = create_test_venue(1.2834 + 0.041, 103.8607 + 0.041);
        assert!(crate::core::distance::is_within_bounding_box(corner.latitude, corner.longitude, &bbox));
        assert!(venue_within_radius(&corner, &query, &bbox).is_none());
    }

    #[test]
    fn test_category_filter() {
        let venue = create_test_venue(1.2834, 103.8607);
        let mut query = create_test_query();
        query.category = Some("wine".to_string());

        assert!(matches_deal_filters(&create_test_deal(Some("Wine"), 10.0), &venue, &query));
        assert!(!matches_deal_filters(&create_test_deal(Some("Cocktails"), 10.0), &venue, &query));
        // Falls back to the venue category ("Beer")
        assert!(!matches_deal_filters(&create_test_deal(None, 10.0), &venue, &query));
    }

    #[test]
    fn test_min_savings_filter() {
        let venue = create_test_venue(1.2834, 103.8607);
        let mut query = create_test_query();
        query.min_savings = Some(30.0);

        assert!(matches_deal_filters(&create_test_deal(None, 30.0), &venue, &query));
        assert!(!matches_deal_filters(&create_test_deal(None, 29.0), &venue, &query));
    }

    #[test]
    fn test_status_filter() {
        let mut query = create_test_query();
        assert!(matches_status_filter(DealStatus::Inactive, &query));

        query.active_only = true;
        assert!(matches_status_filter(DealStatus::Active, &query));
        assert!(!matches_status_filter(DealStatus::Upcoming, &query));
    }
}
