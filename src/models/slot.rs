use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::availability::AvailabilityStatus;

/// Bookable times of day, every 30 minutes across the service window.
pub const TIME_SLOTS: [&str; 21] = [
    "10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "13:00", "13:30", "14:00", "14:30",
    "15:00", "15:30", "16:00", "16:30", "17:00", "17:30", "18:00", "18:30", "19:00", "19:30",
    "20:00",
];

const DAY_LABELS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Weekday index with Sunday as 0 and Saturday as 6.
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

pub fn day_label(date: NaiveDate) -> &'static str {
    DAY_LABELS[day_of_week(date) as usize]
}

pub fn is_weekend(day_of_week: u32) -> bool {
    day_of_week == 0 || day_of_week == 6
}

/// `"M/D"` without zero padding.
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// Key the availability oracle is queried with.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn is_time_slot(time: &str) -> bool {
    TIME_SLOTS.contains(&time)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarSlot {
    pub date: NaiveDate,
    pub time: &'static str,
    pub status: AvailabilityStatus,
}

impl CalendarSlot {
    pub fn is_selectable(&self) -> bool {
        self.status.is_selectable()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedSlot {
    pub date: NaiveDate,
    pub time: String,
    pub date_str: String,
    pub day_label: String,
    pub day_of_week: u32,
}

impl SelectedSlot {
    pub fn new(date: NaiveDate, time: &str) -> Self {
        Self {
            date,
            time: time.to_string(),
            date_str: short_date(date),
            day_label: day_label(date).to_string(),
            day_of_week: day_of_week(date),
        }
    }

    pub fn is_weekend(&self) -> bool {
        is_weekend(self.day_of_week)
    }
}
