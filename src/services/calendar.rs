use chrono::Duration;

use crate::models::Reservation;

pub fn generate_ics(reservation: &Reservation, clinic_name: &str) -> Option<String> {
    let starts_at = reservation.starts_at()?;
    let dtstart = starts_at.format("%Y%m%dT%H%M%S").to_string();
    let dtend = (starts_at + Duration::minutes(i64::from(reservation.duration_minutes)))
        .format("%Y%m%dT%H%M%S")
        .to_string();
    let dtstamp = reservation.created_at.format("%Y%m%dT%H%M%S").to_string();
    let uid = format!("{}@clinicbook", reservation.id);
    let summary = format!("{} @ {}", reservation.menu, clinic_name);
    let description = format!(
        "{} / {}",
        reservation.customer_name,
        reservation.status.label()
    );

    Some(format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Clinicbook//Reservations//JA\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationStatus;
    use chrono::NaiveDateTime;

    fn reservation(date: &str, time: &str, duration_minutes: i32) -> Reservation {
        let created =
            NaiveDateTime::parse_from_str("2026-02-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Reservation {
            id: "res-1".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            customer_name: "鈴木 花子".to_string(),
            is_new_customer: false,
            menu: "ダーマペン4".to_string(),
            price: 19800,
            duration_minutes,
            staff: None,
            status: ReservationStatus::Confirmed,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_generate_ics() {
        let ics = generate_ics(&reservation("2026-02-10", "14:00", 50), "Clinicity 渋谷本院").unwrap();
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("UID:res-1@clinicbook"));
        assert!(ics.contains("DTSTAMP:20260201T090000"));
        assert!(ics.contains("DTSTART:20260210T140000"));
        assert!(ics.contains("DTEND:20260210T145000"));
        assert!(ics.contains("SUMMARY:ダーマペン4 @ Clinicity 渋谷本院"));
        assert!(ics.contains("DESCRIPTION:鈴木 花子 / 確定"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn test_generate_ics_rejects_bad_time() {
        assert!(generate_ics(&reservation("2026-02-10", "2pm", 60), "X").is_none());
        assert!(generate_ics(&reservation("10/2/2026", "14:00", 60), "X").is_none());
    }
}
