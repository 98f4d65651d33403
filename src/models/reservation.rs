use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub date: String,
    pub time: String,
    pub customer_name: String,
    pub is_new_customer: bool,
    pub menu: String,
    pub price: i64,
    pub duration_minutes: i32,
    pub staff: Option<String>,
    pub status: ReservationStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Reservation {
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        let date = chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        Some(date.and_time(time))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Canceled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "completed" => Some(ReservationStatus::Completed),
            "canceled" => Some(ReservationStatus::Canceled),
            _ => None,
        }
    }

    /// Label shown on the back office badge.
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "未確定",
            ReservationStatus::Confirmed => "確定",
            ReservationStatus::Completed => "来店済",
            ReservationStatus::Canceled => "キャンセル",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReservationStatus),
}

impl StatusFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s == "all" {
            return Some(StatusFilter::All);
        }
        ReservationStatus::parse(s).map(StatusFilter::Only)
    }

    pub fn matches(&self, status: ReservationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}
