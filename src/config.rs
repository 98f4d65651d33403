use std::env;

use crate::models::ClinicInfo;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    pub clinic: ClinicInfo,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "clinicbook.db".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            clinic: ClinicInfo {
                id: env::var("CLINIC_ID")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1),
                name: env::var("CLINIC_NAME").unwrap_or_else(|_| "Clinicity 渋谷本院".to_string()),
                area: env::var("CLINIC_AREA").unwrap_or_else(|_| "渋谷".to_string()),
                image: env::var("CLINIC_IMAGE")
                    .unwrap_or_else(|_| "/images/skin/001.webp".to_string()),
            },
        }
    }
}
