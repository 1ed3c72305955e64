//! Derived academic metrics.
//!
//! Pure functions shared by the attendance, test, and fee services. All of
//! them are total: empty inputs produce zeros, never NaN.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Percentage of present records, `0.0` when there are no records at all.
pub fn attendance_percentage(present: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (present as f64 / total as f64) * 100.0
}

/// Map a percentage to its grade band. Lower bounds are inclusive.
pub fn grade_band(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "A+"
    } else if percentage >= 80.0 {
        "A"
    } else if percentage >= 70.0 {
        "B+"
    } else if percentage >= 60.0 {
        "B"
    } else if percentage >= 50.0 {
        "C"
    } else {
        "F"
    }
}

/// Calendar window for attendance summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SummaryWindow {
    Day,
    Week,
    Month,
}

impl SummaryWindow {
    /// Start of the calendar bucket containing `now`: midnight today, the
    /// Monday of the current week, or the first of the current month.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
            .and_utc();
        match self {
            Self::Day => midnight,
            Self::Week => {
                midnight - Duration::days(now.weekday().num_days_from_monday() as i64)
            }
            Self::Month => {
                let first = now
                    .date_naive()
                    .with_day(1)
                    .expect("day 1 exists in every month");
                first
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight is always a valid time")
                    .and_utc()
            }
        }
    }
}
