use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use movievote_errors::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How "this week" is derived from the current instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekPolicy {
    /// Whole-day shifts of `now`: Sunday..Friday maps to `[now - d, now + (5 - d))`
    /// where `d` is the Sunday-based day index; Saturday maps to `[now, now + 6)`.
    /// The window moves with the clock and keeps the time of day of `now`.
    #[default]
    Rolling,
    /// `[Sunday 00:00, next Sunday 00:00)` in UTC, containing `now`.
    Calendar,
}

impl FromStr for WeekPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rolling" => Ok(Self::Rolling),
            "calendar" => Ok(Self::Calendar),
            other => Err(AppError::Config(format!(
                "unknown week window policy `{other}` (expected `rolling` or `calendar`)"
            ))),
        }
    }
}

/// Half-open interval `[from, to)` of update times that count as this week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl WeekWindow {
    pub fn for_instant(now: DateTime<Utc>, policy: WeekPolicy) -> Self {
        let day_index = i64::from(now.weekday().num_days_from_sunday());
        match policy {
            WeekPolicy::Rolling if day_index <= 5 => Self {
                from: now - Duration::days(day_index),
                to: now + Duration::days(5 - day_index),
            },
            WeekPolicy::Rolling => Self {
                from: now,
                to: now + Duration::days(6),
            },
            WeekPolicy::Calendar => {
                let sunday = now.date_naive() - Duration::days(day_index);
                let from = Utc.from_utc_datetime(&sunday.and_time(NaiveTime::default()));
                Self {
                    from,
                    to: from + Duration::days(7),
                }
            }
        }
    }

    #[cfg(test)]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.from && instant < self.to
    }
}
