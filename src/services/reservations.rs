use chrono::{Duration, NaiveDate};
use rusqlite::Connection;

use crate::db::queries;
use crate::models::{Reservation, ReservationStatus, StatusFilter};

/// Back office day navigation.
pub fn shift_day(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

pub fn list_for_day(
    conn: &Connection,
    date: NaiveDate,
    filter: StatusFilter,
) -> anyhow::Result<Vec<Reservation>> {
    queries::get_reservations_for_date(conn, &date.format("%Y-%m-%d").to_string(), filter)
}

/// Returns false when no reservation has the given id.
pub fn change_status(
    conn: &Connection,
    id: &str,
    status: ReservationStatus,
) -> anyhow::Result<bool> {
    let updated = queries::update_reservation_status(conn, id, status)?;
    if updated {
        tracing::info!(reservation_id = id, status = status.as_str(), "reservation status changed");
    }
    Ok(updated)
}
