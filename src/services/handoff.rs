use chrono::Utc;
use rusqlite::Connection;

use crate::db::queries;
use crate::models::menu::{parse_duration_minutes, parse_price_yen};
use crate::models::{BookingRecord, Reservation, ReservationStatus};

const DEFAULT_DURATION_MINUTES: i32 = 60;
pub const GUEST_NAME: &str = "ゲスト";

/// Receives the frozen record when a booking is confirmed.
pub trait BookingHandoff {
    fn hand_off(&self, record: &BookingRecord) -> anyhow::Result<()>;
}

/// Records confirmed bookings as pending reservations in the back office.
pub struct ReservationLedger<'a> {
    conn: &'a Connection,
    customer_name: String,
}

impl<'a> ReservationLedger<'a> {
    pub fn new(conn: &'a Connection, customer_name: Option<&str>) -> Self {
        Self {
            conn,
            customer_name: customer_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(GUEST_NAME)
                .to_string(),
        }
    }
}

impl BookingHandoff for ReservationLedger<'_> {
    fn hand_off(&self, record: &BookingRecord) -> anyhow::Result<()> {
        let reservation = reservation_from_record(record, &self.customer_name);
        queries::create_reservation(self.conn, &reservation)?;
        tracing::info!(reservation_id = %reservation.id, "reservation recorded");
        Ok(())
    }
}

pub fn reservation_from_record(record: &BookingRecord, customer_name: &str) -> Reservation {
    let now = Utc::now().naive_utc();
    Reservation {
        id: uuid::Uuid::new_v4().to_string(),
        date: record.date.format("%Y-%m-%d").to_string(),
        time: record.time.clone(),
        customer_name: customer_name.to_string(),
        is_new_customer: true,
        menu: record.menu_name.clone(),
        price: parse_price_yen(&record.menu_price).unwrap_or(0),
        duration_minutes: parse_duration_minutes(&record.menu_time)
            .unwrap_or(DEFAULT_DURATION_MINUTES),
        staff: None,
        status: ReservationStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}
