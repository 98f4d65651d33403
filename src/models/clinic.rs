use serde::{Deserialize, Serialize};

/// Static clinic details the booking flow is started with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicInfo {
    pub id: u32,
    pub name: String,
    pub area: String,
    pub image: String,
}
