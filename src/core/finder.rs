use std::cmp::Ordering;

use chrono::{DateTime, TimeZone};

use crate::core::{
    distance::{calculate_bounding_box, format_distance, round_to},
    filters::{matches_deal_filters, matches_status_filter, venue_within_radius},
    heat::heat_score_with,
    schedule::deal_status,
};
use crate::models::{DealSignal, DealStatus, DealView, HeatWeights, ScoredVenue, SortOrder, Venue, VenueQuery};

/// Result of a venue search
#[derive(Debug)]
pub struct FinderResult {
    pub venues: Vec<ScoredVenue>,
    pub total_candidates: usize,
}

/// Venue search orchestrator
///
/// # Pipeline Stages
/// 1. Geospatial bounding box pre-filter
/// 2. Exact radius cutoff
/// 3. Deal status evaluation and heat scoring
/// 4. Deal filters (category, savings, active only)
/// 5. Sorting and truncation
#[derive(Debug, Clone)]
pub struct VenueFinder {
    weights: HeatWeights,
}

impl VenueFinder {
    pub fn new(weights: HeatWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: HeatWeights::default(),
        }
    }

    /// Find venues around the query origin, evaluated at `now`
    ///
    /// Heat is calculated from each venue's deals that are active at `now`,
    /// before the query's deal filters are applied. When any deal filter is
    /// set, venues left without matching deals are dropped.
    pub fn find_venues<Tz: TimeZone>(
        &self,
        query: &VenueQuery,
        venues: Vec<Venue>,
        now: &DateTime<Tz>,
    ) -> FinderResult {
        let total_candidates = venues.len();

        let bbox = calculate_bounding_box(
            query.origin.latitude,
            query.origin.longitude,
            query.radius_km,
        );

        let mut scored: Vec<ScoredVenue> = venues
            .into_iter()
            .filter_map(|venue| {
                let distance_km = venue_within_radius(&venue, query, &bbox)?;
                self.score_venue(venue, distance_km, query, now)
            })
            .collect();

        sort_venues(&mut scored, query.sort);
        scored.truncate(query.limit);

        tracing::debug!(
            "Venue search kept {} of {} candidates within {}km",
            scored.len(),
            total_candidates,
            query.radius_km
        );

        FinderResult {
            venues: scored,
            total_candidates,
        }
    }

    fn score_venue<Tz: TimeZone>(
        &self,
        venue: Venue,
        distance_km: f64,
        query: &VenueQuery,
        now: &DateTime<Tz>,
    ) -> Option<ScoredVenue> {
        let evaluated: Vec<DealView> = venue
            .deals
            .iter()
            .map(|deal| DealView {
                status: deal_status(&deal.window, now),
                deal: deal.clone(),
            })
            .collect();

        let active_signals: Vec<DealSignal> = evaluated
            .iter()
            .filter(|view| view.status == DealStatus::Active)
            .map(|view| view.deal.signal())
            .collect();
        let heat = heat_score_with(&self.weights, &active_signals, venue.heat_level);

        let deals: Vec<DealView> = evaluated
            .into_iter()
            .filter(|view| matches_deal_filters(&view.deal, &venue, query))
            .filter(|view| matches_status_filter(view.status, query))
            .collect();

        if query.filters_deals() && deals.is_empty() {
            return None;
        }

        Some(ScoredVenue {
            id: venue.id,
            name: venue.name,
            category: venue.category,
            latitude: venue.latitude,
            longitude: venue.longitude,
            distance_km: round_to(distance_km, 2),
            distance_label: format_distance(distance_km),
            heat,
            active_deals: active_signals.len(),
            deals,
        })
    }
}

impl Default for VenueFinder {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn sort_venues(venues: &mut [ScoredVenue], order: SortOrder) {
    let by_distance = |a: &ScoredVenue, b: &ScoredVenue| {
        a.distance_km.partial_cmp(&b.distance_km).unwrap_or(Ordering::Equal)
    };
    let by_heat = |a: &ScoredVenue, b: &ScoredVenue| {
        b.heat.level.partial_cmp(&a.heat.level).unwrap_or(Ordering::Equal)
    };

    match order {
        SortOrder::Distance => venues.sort_by(|a, b| by_distance(a, b).then_with(|| by_heat(a, b))),
        SortOrder::Heat => venues.sort_by(|a, b| by_heat(a, b).then_with(|| by_distance(a, b))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Deal, GeoPoint, HeatLabel, TimeWindow};
    use chrono::FixedOffset;

    fn create_deal(id: &str, savings: f64, days: &str, start: &str, end: &str) -> Deal {
        Deal {
            id: id.to_string(),
            title: format!("Deal {}", id),
            category: None,
            savings_percentage: savings,
            window: TimeWindow {
                valid_days: days.to_string(),
                start_time: start.to_string(),
                end_time: end.to_string(),
            },
        }
    }

    fn create_venue(id: &str, lat: f64, lng: f64, deals: Vec<Deal>) -> Venue {
        Venue {
            id: id.to_string(),
            name: format!("Venue {}", id),
            category: Some("Beer".to_string()),
            latitude: lat,
            longitude: lng,
            deals,
            heat_level: None,
        }
    }

    fn create_query() -> VenueQuery {
        VenueQuery {
            origin: GeoPoint::new(1.2834, 103.8607), // Marina Bay
            radius_km: 5.0,
            category: None,
            min_savings: None,
            active_only: false,
            sort: SortOrder::Distance,
            limit: 10,
        }
    }

    // Wednesday 18:30 Singapore time
    fn wednesday_evening() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 15, 18, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_find_venues_basic() {
        let finder = VenueFinder::with_default_weights();
        let venues = vec![
            create_venue("near", 1.2850, 103.8550, vec![]),
            create_venue("changi", 1.3644, 103.9915, vec![]),
        ];

        let result = finder.find_venues(&create_query(), venues, &wednesday_evening());

        assert_eq!(result.total_candidates, 2);
        assert_eq!(result.venues.len(), 1);
        assert_eq!(result.venues[0].id, "near");
        assert_eq!(result.venues[0].distance_label, "658m");
        assert_eq!(result.venues[0].heat.label, HeatLabel::New);
    }

    #[test]
    fn test_heat_counts_only_active_deals() {
        let finder = VenueFinder::with_default_weights();
        let venues = vec![create_venue(
            "bar",
            1.2850,
            103.8550,
            vec![
                create_deal("a", 50.0, "Daily", "17:00", "20:00"),
                create_deal("b", 50.0, "Daily", "17:00", "20:00"),
                create_deal("late", 50.0, "Daily", "22:00", "02:00"),
            ],
        )];

        let result = finder.find_venues(&create_query(), venues, &wednesday_evening());
        let venue = &result.venues[0];

        assert_eq!(venue.active_deals, 2);
        assert_eq!(venue.heat.level, 6.0);
        assert_eq!(venue.deals.len(), 3);
        assert_eq!(venue.deals[2].status, DealStatus::Upcoming);
    }

    #[test]
    fn test_active_only_drops_empty_venues() {
        let finder = VenueFinder::with_default_weights();
        let venues = vec![
            create_venue("open", 1.2850, 103.8550, vec![create_deal("a", 10.0, "Wed", "1700", "2000")]),
            create_venue("weekend", 1.2900, 103.8600, vec![create_deal("b", 10.0, "Weekends", "1700", "2000")]),
        ];
        let mut query = create_query();
        query.active_only = true;

        let result = finder.find_venues(&query, venues, &wednesday_evening());

        assert_eq!(result.venues.len(), 1);
        assert_eq!(result.venues[0].id, "open");
    }

    #[test]
    fn test_sort_by_heat() {
        let finder = VenueFinder::with_default_weights();
        let mut hot = create_venue("hot", 1.3000, 103.8700, vec![]);
        hot.heat_level = Some(9.5);
        let venues = vec![create_venue("close", 1.2840, 103.8610, vec![]), hot];
        let mut query = create_query();

        let by_distance = finder.find_venues(&query, venues.clone(), &wednesday_evening());
        assert_eq!(by_distance.venues[0].id, "close");

        query.sort = SortOrder::Heat;
        let by_heat = finder.find_venues(&query, venues, &wednesday_evening());
        assert_eq!(by_heat.venues[0].id, "hot");
        assert_eq!(by_heat.venues[0].heat.label, HeatLabel::HotSpot);
    }

    #[test]
    fn test_respects_limit() {
        let finder = VenueFinder::with_default_weights();
        let venues: Vec<Venue> = (0..20)
            .map(|i| create_venue(&i.to_string(), 1.2834 + i as f64 * 0.001, 103.8607, vec![]))
            .collect();
        let mut query = create_query();
        query.limit = 5;

        let result = finder.find_venues(&query, venues, &wednesday_evening());

        assert_eq!(result.venues.len(), 5);
        assert_eq!(result.venues[0].id, "0");
    }
}
