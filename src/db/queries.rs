use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{AccountStatus, Reservation, ReservationStatus, StatusFilter, UserAccount};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Reservations ──

pub fn create_reservation(conn: &Connection, reservation: &Reservation) -> anyhow::Result<()> {
    let created_at = reservation.created_at.format(TIMESTAMP_FORMAT).to_string();
    let updated_at = reservation.updated_at.format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO reservations (id, date, time, customer_name, is_new_customer, menu, price, duration_minutes, staff, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            reservation.id,
            reservation.date,
            reservation.time,
            reservation.customer_name,
            reservation.is_new_customer as i32,
            reservation.menu,
            reservation.price,
            reservation.duration_minutes,
            reservation.staff,
            reservation.status.as_str(),
            created_at,
            updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_reservations_for_date(
    conn: &Connection,
    date: &str,
    filter: StatusFilter,
) -> anyhow::Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, time, customer_name, is_new_customer, menu, price, duration_minutes, staff, status, created_at, updated_at
         FROM reservations WHERE date = ?1 ORDER BY time ASC, created_at ASC",
    )?;

    let rows = stmt.query_map(params![date], |row| Ok(parse_reservation_row(row)))?;

    let mut reservations = vec![];
    for row in rows {
        let reservation = row??;
        if filter.matches(reservation.status) {
            reservations.push(reservation);
        }
    }
    Ok(reservations)
}

pub fn get_reservation_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Reservation>> {
    let result = conn.query_row(
        "SELECT id, date, time, customer_name, is_new_customer, menu, price, duration_minutes, staff, status, created_at, updated_at
         FROM reservations WHERE id = ?1",
        params![id],
        |row| Ok(parse_reservation_row(row)),
    );

    match result {
        Ok(reservation) => Ok(Some(reservation?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_reservation_status(
    conn: &Connection,
    id: &str,
    status: ReservationStatus,
) -> anyhow::Result<bool> {
    let now = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();
    let count = conn.execute(
        "UPDATE reservations SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )?;
    Ok(count > 0)
}

fn parse_reservation_row(row: &rusqlite::Row) -> anyhow::Result<Reservation> {
    let status_str: String = row.get(9)?;
    let created_at_str: String = row.get(10)?;
    let updated_at_str: String = row.get(11)?;

    let status = ReservationStatus::parse(&status_str)
        .ok_or_else(|| anyhow::anyhow!("unknown reservation status: {status_str}"))?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| Utc::now().naive_utc());
    let updated_at = NaiveDateTime::parse_from_str(&updated_at_str, TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Reservation {
        id: row.get(0)?,
        date: row.get(1)?,
        time: row.get(2)?,
        customer_name: row.get(3)?,
        is_new_customer: row.get::<_, i32>(4)? != 0,
        menu: row.get(5)?,
        price: row.get(6)?,
        duration_minutes: row.get(7)?,
        staff: row.get(8)?,
        status,
        created_at,
        updated_at,
    })
}

// ── User accounts ──

pub fn list_user_accounts(conn: &Connection, suspended_only: bool) -> anyhow::Result<Vec<UserAccount>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, phone, registered_at, booking_count, cancel_count, status
         FROM user_accounts WHERE (?1 = 0 OR status = 'suspended') ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![suspended_only as i32], |row| {
        let status: String = row.get(7)?;
        Ok(UserAccount {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            registered_at: row.get(4)?,
            booking_count: row.get(5)?,
            cancel_count: row.get(6)?,
            status: AccountStatus::from_str(&status),
        })
    })?;

    let mut accounts = vec![];
    for row in rows {
        accounts.push(row?);
    }
    Ok(accounts)
}

pub fn get_account_status(conn: &Connection, id: i64) -> anyhow::Result<Option<AccountStatus>> {
    let result = conn.query_row(
        "SELECT status FROM user_accounts WHERE id = ?1",
        params![id],
        |row| row.get::<_, String>(0),
    );

    match result {
        Ok(status) => Ok(Some(AccountStatus::from_str(&status))),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn set_account_status(conn: &Connection, id: i64, status: AccountStatus) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE user_accounts SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

pub fn count_suspended_accounts(conn: &Connection) -> anyhow::Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM user_accounts WHERE status = 'suspended'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
