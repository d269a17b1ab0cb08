use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};
use thiserror::Error;

use crate::models::{DealStatus, TimeWindow};

const MINUTES_PER_DAY: u16 = 24 * 60;

const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Errors raised while parsing the free-text fields of a happy hour window
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("empty time value")]
    EmptyTime,

    #[error("unrecognized time format: {0:?}")]
    InvalidTime(String),

    #[error("time out of range: {0:?}")]
    TimeOutOfRange(String),

    #[error("empty day specification")]
    EmptyDays,

    #[error("unrecognized day: {0:?}")]
    UnknownDay(String),
}

/// Normalize a stored time string to `HH:MM`
///
/// Purely numeric input is split by length: 3 digits are `H` + `MM` ("930"),
/// 4 digits are `HH` + `MM` ("1730"). Input already containing `:` passes
/// through, padded to two hour digits.
pub fn normalize_time(raw: &str) -> Result<String, ScheduleError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ScheduleError::EmptyTime);
    }

    let (hours, minutes) = if let Some((h, m)) = value.split_once(':') {
        (h.trim(), m.trim())
    } else if value.bytes().all(|b| b.is_ascii_digit()) {
        match value.len() {
            3 => value.split_at(1),
            4 => value.split_at(2),
            _ => return Err(ScheduleError::InvalidTime(raw.to_string())),
        }
    } else {
        return Err(ScheduleError::InvalidTime(raw.to_string()));
    };

    let digits_ok = |s: &str, max_len: usize| {
        !s.is_empty() && s.len() <= max_len && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits_ok(hours, 2) || minutes.len() != 2 || !digits_ok(minutes, 2) {
        return Err(ScheduleError::InvalidTime(raw.to_string()));
    }

    Ok(format!("{:0>2}:{}", hours, minutes))
}

/// Wall-clock time of day, stored as minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WallTime(u16);

impl WallTime {
    pub fn from_hm(hours: u16, minutes: u16) -> Option<Self> {
        let total = hours.checked_mul(60)?.checked_add(minutes)?;
        if minutes >= 60 || total > MINUTES_PER_DAY {
            return None;
        }
        Some(Self(total))
    }

    /// Time of day of an instant in its own timezone
    pub fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self((instant.hour() * 60 + instant.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for WallTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_time(s)?;
        let (h, m) = normalized
            .split_once(':')
            .ok_or_else(|| ScheduleError::InvalidTime(s.to_string()))?;
        let hours: u16 = h.parse().map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;
        let minutes: u16 = m.parse().map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;

        Self::from_hm(hours, minutes).ok_or_else(|| ScheduleError::TimeOutOfRange(s.to_string()))
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Set of weekdays a deal runs on, indexed Monday = 0 ... Sunday = 6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpec(u8);

impl DaySpec {
    pub const ALL: DaySpec = DaySpec(0b111_1111);
    pub const WEEKDAYS: DaySpec = DaySpec(0b001_1111);
    pub const WEEKENDS: DaySpec = DaySpec(0b110_0000);

    fn single(index: usize) -> Self {
        Self(1 << index)
    }

    /// Inclusive range; wraps past Sunday when `start > end`
    fn range(start: usize, end: usize) -> Self {
        if start <= end {
            (start..=end).fold(Self(0), |acc, i| acc.union(Self::single(i)))
        } else {
            (start..7)
                .chain(0..=end)
                .fold(Self(0), |acc, i| acc.union(Self::single(i)))
        }
    }

    fn union(self, other: DaySpec) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }

    fn parse_range(item: &str) -> Result<Self, ScheduleError> {
        match item.split_once('-') {
            Some((start, end)) => Ok(Self::range(day_index(start)?, day_index(end)?)),
            None => Ok(Self::single(day_index(item)?)),
        }
    }
}

impl FromStr for DaySpec {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim().to_lowercase();
        if spec.is_empty() {
            return Err(ScheduleError::EmptyDays);
        }

        match spec.as_str() {
            "daily" | "all days" | "everyday" | "every day" => return Ok(Self::ALL),
            "weekends" | "weekend" => return Ok(Self::WEEKENDS),
            "weekdays" | "weekday" => return Ok(Self::WEEKDAYS),
            _ => {}
        }

        if spec.contains(',') {
            return spec
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .try_fold(Self(0), |acc, item| Ok(acc.union(Self::parse_range(item)?)));
        }

        Self::parse_range(&spec)
    }
}

/// Monday-first index of a day name or abbreviation of at least three letters
fn day_index(token: &str) -> Result<usize, ScheduleError> {
    let token = token.trim().trim_end_matches('.').to_lowercase();
    if token.len() < 3 {
        return Err(ScheduleError::UnknownDay(token));
    }

    DAY_NAMES
        .iter()
        .position(|name| name.starts_with(token.as_str()))
        .ok_or(ScheduleError::UnknownDay(token))
}

/// Check whether `weekday` is covered by a free-text day specification
///
/// Unparseable specifications never match.
pub fn is_valid_day(spec: &str, weekday: Weekday) -> bool {
    match spec.parse::<DaySpec>() {
        Ok(days) => days.contains(weekday),
        Err(e) => {
            tracing::debug!("Unparseable day specification {:?}: {}", spec, e);
            false
        }
    }
}

/// Parsed form of a [`TimeWindow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HappyHour {
    pub days: DaySpec,
    pub start: WallTime,
    pub end: WallTime,
}

impl HappyHour {
    pub fn parse(window: &TimeWindow) -> Result<Self, ScheduleError> {
        Ok(Self {
            days: window.valid_days.parse()?,
            start: window.start_time.parse()?,
            end: window.end_time.parse()?,
        })
    }

    /// True when the window runs past midnight (e.g. 22:00-02:00)
    pub fn is_overnight(&self) -> bool {
        self.start > self.end
    }

    /// Whether the window is active at `now`, in `now`'s own timezone
    pub fn is_active_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        if !self.days.contains(now.weekday()) {
            return false;
        }

        let now = WallTime::of(now);
        if self.is_overnight() {
            now >= self.start || now <= self.end
        } else {
            self.start <= now && now <= self.end
        }
    }

    pub fn status_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DealStatus {
        if self.is_active_at(now) {
            DealStatus::Active
        } else if self.days.contains(now.weekday()) && WallTime::of(now) < self.start {
            DealStatus::Upcoming
        } else {
            DealStatus::Inactive
        }
    }
}

/// Decide whether a happy hour window is active at `now`
///
/// The weekday and time of day are read in `now`'s timezone, so callers pick
/// the reference zone by converting the instant before calling. Any
/// unparseable field makes the window inactive.
pub fn is_within_window<Tz: TimeZone>(window: &TimeWindow, now: &DateTime<Tz>) -> bool {
    match HappyHour::parse(window) {
        Ok(happy_hour) => happy_hour.is_active_at(now),
        Err(e) => {
            tracing::debug!("Treating unparseable window {:?} as inactive: {}", window, e);
            false
        }
    }
}

/// Badge status of a deal at `now`: active, upcoming later today, or inactive
pub fn deal_status<Tz: TimeZone>(window: &TimeWindow, now: &DateTime<Tz>) -> DealStatus {
    match HappyHour::parse(window) {
        Ok(happy_hour) => happy_hour.status_at(now),
        Err(e) => {
            tracing::debug!("Treating unparseable window {:?} as inactive: {}", window, e);
            DealStatus::Inactive
        }
    }
}
