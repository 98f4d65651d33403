use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub registered_at: String,
    pub booking_count: i64,
    pub cancel_count: i64,
    pub status: AccountStatus,
}

impl UserAccount {
    pub fn is_high_risk(&self) -> bool {
        is_high_risk(self.booking_count, self.cancel_count)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Suspended => "suspended",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "suspended" => AccountStatus::Suspended,
            _ => AccountStatus::Active,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AccountStatus::Active => AccountStatus::Suspended,
            AccountStatus::Suspended => AccountStatus::Active,
        }
    }
}

/// Frequent cancellers: more than 30% of bookings cancelled, at least three times.
pub fn is_high_risk(booking_count: i64, cancel_count: i64) -> bool {
    if booking_count <= 0 {
        return false;
    }
    cancel_count as f64 / booking_count as f64 > 0.3 && cancel_count >= 3
}
