// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod finder;
pub mod heat;
pub mod schedule;

pub use distance::{calculate_bounding_box, format_distance, haversine_distance, is_within_bounding_box, round_to};
pub use filters::{matches_deal_filters, matches_status_filter, venue_within_radius};
pub use finder::{FinderResult, VenueFinder};
pub use heat::{heat_score, heat_score_with, label_for};
pub use schedule::{deal_status, is_valid_day, is_within_window, normalize_time, DaySpec, HappyHour, ScheduleError, WallTime};
