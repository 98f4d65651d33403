use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    Plenty,
    Limited,
    Full,
    Unavailable,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Plenty => "PLENTY",
            AvailabilityStatus::Limited => "LIMITED",
            AvailabilityStatus::Full => "FULL",
            AvailabilityStatus::Unavailable => "UNAVAILABLE",
        }
    }

    /// Symbol shown in the grid cell.
    pub fn symbol(&self) -> &'static str {
        match self {
            AvailabilityStatus::Plenty => "◎",
            AvailabilityStatus::Limited => "○",
            AvailabilityStatus::Full => "×",
            AvailabilityStatus::Unavailable => "—",
        }
    }

    pub fn is_selectable(&self) -> bool {
        matches!(self, AvailabilityStatus::Plenty | AvailabilityStatus::Limited)
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
const KEY_SEPARATOR: u8 = 0x1f;

// Cumulative upper bounds of the Plenty, Limited and Full buckets.
const PLENTY_BELOW: f64 = 0.50;
const LIMITED_BELOW: f64 = 0.75;
const FULL_BELOW: f64 = 0.90;

/// Deterministic availability of a (date, time) cell.
///
/// The status is derived from an FNV-1a hash of both keys, so the same pair
/// always yields the same answer across calls, runs and platforms. Callers
/// should key dates with the full calendar date (`YYYY-MM-DD`); a key like
/// `"2/10"` would alias the same day across years.
pub fn availability(date_key: &str, time_key: &str) -> AvailabilityStatus {
    let value = unit_interval(date_key, time_key);

    if value < PLENTY_BELOW {
        AvailabilityStatus::Plenty
    } else if value < LIMITED_BELOW {
        AvailabilityStatus::Limited
    } else if value < FULL_BELOW {
        AvailabilityStatus::Full
    } else {
        AvailabilityStatus::Unavailable
    }
}

fn seed(date_key: &str, time_key: &str) -> u64 {
    date_key
        .bytes()
        .chain(std::iter::once(KEY_SEPARATOR))
        .chain(time_key.bytes())
        .fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

// SplitMix64 finalizer. FNV alone leaves the high bits poorly mixed for
// short keys that differ only in their last characters.
fn mix(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn unit_interval(date_key: &str, time_key: &str) -> f64 {
    (mix(seed(date_key, time_key)) >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slot::TIME_SLOTS;
    use std::collections::HashSet;

    #[test]
    fn test_same_keys_same_status() {
        for time in TIME_SLOTS {
            let first = availability("2026-02-10", time);
            for _ in 0..5 {
                assert_eq!(availability("2026-02-10", time), first);
            }
        }
    }

    #[test]
    fn test_known_statuses() {
        // Pinned so a change to the hash shows up as a test failure.
        assert_eq!(availability("2026-02-10", "10:00"), AvailabilityStatus::Plenty);
        assert_eq!(availability("2026-02-10", "10:30"), AvailabilityStatus::Limited);
        assert_eq!(availability("2026-02-10", "11:00"), AvailabilityStatus::Full);
        assert_eq!(availability("2026-02-10", "12:30"), AvailabilityStatus::Unavailable);
        assert_eq!(availability("2026-02-10", "14:00"), AvailabilityStatus::Plenty);
    }

    #[test]
    fn test_full_date_keys_do_not_alias() {
        // Same day-of-month, different month and year.
        assert_ne!(
            availability("2026-02-10", "10:30"),
            availability("2026-03-10", "10:30")
        );
        assert_ne!(
            availability("2026-02-10", "10:00"),
            availability("2025-02-10", "10:00")
        );
    }

    #[test]
    fn test_every_bucket_is_reachable() {
        let mut seen = HashSet::new();
        for day in 1..=28 {
            let date = format!("2026-02-{day:02}");
            for time in TIME_SLOTS {
                seen.insert(availability(&date, time));
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_unit_interval_bounds() {
        for day in 1..=31 {
            let date = format!("2026-01-{day:02}");
            for time in TIME_SLOTS {
                let v = unit_interval(&date, time);
                assert!((0.0..1.0).contains(&v));
            }
        }
        assert!((0.0..1.0).contains(&unit_interval("", "")));
    }

    #[test]
    fn test_selectable_statuses() {
        assert!(AvailabilityStatus::Plenty.is_selectable());
        assert!(AvailabilityStatus::Limited.is_selectable());
        assert!(!AvailabilityStatus::Full.is_selectable());
        assert!(!AvailabilityStatus::Unavailable.is_selectable());
    }

    #[test]
    fn test_status_serializes_screaming_case() {
        let json = serde_json::to_string(&AvailabilityStatus::Unavailable).unwrap();
        assert_eq!(json, "\"UNAVAILABLE\"");
        assert_eq!(AvailabilityStatus::Limited.as_str(), "LIMITED");
        assert_eq!(AvailabilityStatus::Full.symbol(), "×");
    }
}
