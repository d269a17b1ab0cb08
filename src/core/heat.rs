use crate::models::{DealSignal, HeatLabel, HeatScore, HeatWeights};

/// Highest heat level a venue can reach
pub const MAX_HEAT_LEVEL: f64 = 10.0;

/// Calculate a venue's heat score (0-10) with the default weights
///
/// Scoring formula:
/// level = min(10,
///     min(5, deals / 2) +              # volume, capped
///     (good_deals / deals) * 5         # share of deals with >= 20% savings
/// )
///
/// An explicit level, when given, is clamped to 0-10 and used as-is.
pub fn heat_score(deals: &[DealSignal], explicit_level: Option<f64>) -> HeatScore {
    heat_score_with(&HeatWeights::default(), deals, explicit_level)
}

/// Calculate a venue's heat score with configured weights
pub fn heat_score_with(
    weights: &HeatWeights,
    deals: &[DealSignal],
    explicit_level: Option<f64>,
) -> HeatScore {
    if let Some(level) = explicit_level {
        let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, MAX_HEAT_LEVEL) };
        return HeatScore { level, label: label_for(level) };
    }

    if deals.is_empty() {
        return HeatScore { level: 0.0, label: HeatLabel::New };
    }

    let total = deals.len() as f64;
    let good_deals = deals
        .iter()
        .filter(|d| d.savings_percentage >= weights.good_deal_savings_pct)
        .count() as f64;

    let base_score = calculate_volume_score(total, weights);
    let discount_bonus = (good_deals / total) * weights.max_discount_points;

    let level = (base_score + discount_bonus).min(MAX_HEAT_LEVEL);

    HeatScore { level, label: label_for(level) }
}

/// Points from deal count alone, capped so volume cannot dominate
#[inline]
fn calculate_volume_score(deal_count: f64, weights: &HeatWeights) -> f64 {
    (deal_count / weights.deals_per_point).min(weights.max_volume_points)
}

/// Display label for a heat level, first matching threshold wins
pub fn label_for(level: f64) -> HeatLabel {
    if level >= 9.0 {
        HeatLabel::HotSpot
    } else if level >= 7.0 {
        HeatLabel::VeryPopular
    } else if level >= 5.0 {
        HeatLabel::Popular
    } else if level >= 3.0 {
        HeatLabel::Trending
    } else {
        HeatLabel::Regular
    }
}

impl HeatScore {
    /// Width of the popularity meter, in percent
    pub fn meter_width_percent(&self) -> f64 {
        self.level * 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deals(savings: &[f64]) -> Vec<DealSignal> {
        savings
            .iter()
            .map(|&savings_percentage| DealSignal { savings_percentage })
            .collect()
    }

    #[test]
    fn test_empty_is_new() {
        let score = heat_score(&[], None);
        assert_eq!(score.level, 0.0);
        assert_eq!(score.label, HeatLabel::New);
    }

    #[test]
    fn test_volume_cap() {
        let score = heat_score(&deals(&[0.0; 10]), None);
        assert_eq!(score.level, 5.0);
        assert_eq!(score.label, HeatLabel::Popular);

        let many = heat_score(&deals(&[5.0; 20]), None);
        assert_eq!(many.level, 5.0);
    }

    #[test]
    fn test_discount_bonus() {
        let score = heat_score(&deals(&[100.0, 100.0]), None);
        assert_eq!(score.level, 6.0);
        assert_eq!(score.label, HeatLabel::Popular);
    }

    #[test]
    fn test_quality_beats_volume() {
        let weak = heat_score(&deals(&[5.0; 20]), None);
        let strong = heat_score(&deals(&[50.0, 50.0, 50.0]), None);
        assert!(strong.level > weak.level);
    }

    #[test]
    fn test_good_deal_threshold_inclusive() {
        // 1 deal at exactly 20% -> 0.5 + 5
        let score = heat_score(&deals(&[20.0]), None);
        assert_eq!(score.level, 5.5);

        let below = heat_score(&deals(&[19.9]), None);
        assert_eq!(below.level, 0.5);
        assert_eq!(below.label, HeatLabel::Regular);
    }

    #[test]
    fn test_level_capped_at_ten() {
        let score = heat_score(&deals(&[30.0; 12]), None);
        assert_eq!(score.level, 10.0);
        assert_eq!(score.label, HeatLabel::HotSpot);
    }

    #[test]
    fn test_explicit_level() {
        let score = heat_score(&[], Some(9.5));
        assert_eq!(score.level, 9.5);
        assert_eq!(score.label, HeatLabel::HotSpot);

        assert_eq!(heat_score(&deals(&[50.0]), Some(42.0)).level, 10.0);
        assert_eq!(heat_score(&[], Some(-3.0)).level, 0.0);
        assert_eq!(heat_score(&[], Some(f64::NAN)).level, 0.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_for(9.0), HeatLabel::HotSpot);
        assert_eq!(label_for(7.0), HeatLabel::VeryPopular);
        assert_eq!(label_for(6.99), HeatLabel::Popular);
        assert_eq!(label_for(3.0), HeatLabel::Trending);
        assert_eq!(label_for(2.5), HeatLabel::Regular);
    }

    #[test]
    fn test_meter_width() {
        let score = heat_score(&deals(&[100.0, 100.0]), None);
        assert_eq!(score.meter_width_percent(), 60.0);
    }

    #[test]
    fn test_custom_weights() {
        let weights = HeatWeights {
            good_deal_savings_pct: 50.0,
            ..HeatWeights::default()
        };
        let score = heat_score_with(&weights, &deals(&[30.0, 60.0]), None);
        assert_eq!(score.level, 3.5);
        assert_eq!(score.label, HeatLabel::Trending);
    }
}
