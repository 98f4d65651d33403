use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::availability::availability;
use crate::models::slot::{self, CalendarSlot, SelectedSlot, TIME_SLOTS};

const DAYS_PER_WEEK: i64 = 7;

/// One column header of the weekly grid.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GridDay {
    pub date: NaiveDate,
    pub date_num: String,
    pub day_label: &'static str,
    pub day_of_week: u32,
    pub is_weekend: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    pub time: &'static str,
    pub cells: Vec<CalendarSlot>,
}

/// A week of days by the service's time rows, with at most one chosen cell.
///
/// Columns are always computed from the caller's `today`, so moving between
/// weeks regenerates dates relative to the real current date.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SlotGrid {
    week_offset: u32,
    selected: Option<SelectedSlot>,
}

impl SlotGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn week_offset(&self) -> u32 {
        self.week_offset
    }

    pub fn selected(&self) -> Option<&SelectedSlot> {
        self.selected.as_ref()
    }

    /// There is no browsing before the current week.
    pub fn go_to_previous_week(&mut self) {
        self.week_offset = self.week_offset.saturating_sub(1);
    }

    pub fn go_to_next_week(&mut self) {
        self.week_offset = self.week_offset.saturating_add(1);
    }

    pub fn can_go_back(&self) -> bool {
        self.week_offset > 0
    }

    pub fn week_days(&self, today: NaiveDate) -> Vec<GridDay> {
        let start = DAYS_PER_WEEK * i64::from(self.week_offset);
        (0..DAYS_PER_WEEK)
            .filter_map(|column| today.checked_add_signed(Duration::days(start + column)))
            .map(|date| {
                let day_of_week = slot::day_of_week(date);
                GridDay {
                    date,
                    date_num: format!("{:02}", date.day()),
                    day_label: slot::day_label(date),
                    day_of_week,
                    is_weekend: slot::is_weekend(day_of_week),
                }
            })
            .collect()
    }

    /// `2026年2月`, or `2026年2月〜3月` when the week crosses a month.
    pub fn month_label(&self, today: NaiveDate) -> String {
        let days = self.week_days(today);
        let (Some(first), Some(last)) = (days.first(), days.last()) else {
            return String::new();
        };
        let (from, to) = (first.date.month(), last.date.month());
        if from == to {
            format!("{}年{}月", first.date.year(), from)
        } else {
            format!("{}年{}月〜{}月", first.date.year(), from, to)
        }
    }

    pub fn rows(&self, today: NaiveDate) -> Vec<GridRow> {
        let days = self.week_days(today);
        TIME_SLOTS
            .iter()
            .map(|&time| GridRow {
                time,
                cells: days
                    .iter()
                    .map(|day| CalendarSlot {
                        date: day.date,
                        time,
                        status: availability(&slot::date_key(day.date), time),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Chooses the cell if it is open. Closed cells and times outside the
    /// service window leave the grid untouched and return `false`.
    pub fn select_cell(&mut self, date: NaiveDate, time: &str) -> bool {
        if !slot::is_time_slot(time) {
            return false;
        }
        if !availability(&slot::date_key(date), time).is_selectable() {
            return false;
        }
        self.selected = Some(SelectedSlot::new(date, time));
        true
    }

    pub fn is_selected(&self, date: NaiveDate, time: &str) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|s| s.date == date && s.time == time)
    }
}
