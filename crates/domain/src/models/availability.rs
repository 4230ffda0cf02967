//! Weekly availability model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days of the week in display order.
pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Time slots a mentor offers on one day of the week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityResponse {
    pub id: Uuid,
    pub day: String,
    pub slots: Vec<String>,
}

/// Position of a day name in the week, case-insensitive. Unknown days sort last.
pub fn weekday_index(day: &str) -> usize {
    let day = day.trim().to_ascii_lowercase();
    WEEKDAYS
        .iter()
        .position(|d| *d == day || (day.len() >= 3 && d.starts_with(day.as_str())))
        .unwrap_or(WEEKDAYS.len())
}

/// Sorts availability rows Monday through Sunday.
pub fn sort_by_weekday(rows: &mut [AvailabilityResponse]) {
    rows.sort_by_key(|r| weekday_index(&r.day));
}
