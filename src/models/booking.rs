use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::clinic::ClinicInfo;
use super::menu::MenuOption;
use super::slot::SelectedSlot;

/// Choices accumulated by an unfinished booking.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BookingDraft {
    pub menu: Option<MenuOption>,
    pub slot: Option<SelectedSlot>,
}

/// Frozen summary of a confirmed booking, as shown on the receipt screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub clinic_id: u32,
    pub clinic_name: String,
    pub clinic_area: String,
    pub clinic_image: String,
    pub menu_id: u32,
    pub menu_name: String,
    pub menu_time: String,
    pub menu_price: String,
    pub menu_image: String,
    pub date: NaiveDate,
    pub date_str: String,
    pub day_label: String,
    pub day_of_week: u32,
    pub year: i32,
    pub month: u32,
    pub time: String,
}

impl BookingRecord {
    pub fn assemble(clinic: &ClinicInfo, menu: &MenuOption, slot: &SelectedSlot) -> Self {
        Self {
            clinic_id: clinic.id,
            clinic_name: clinic.name.clone(),
            clinic_area: clinic.area.clone(),
            clinic_image: clinic.image.clone(),
            menu_id: menu.id,
            menu_name: menu.name.clone(),
            menu_time: menu.duration.clone(),
            menu_price: menu.price.clone(),
            menu_image: menu.image.clone(),
            date: slot.date,
            date_str: slot.date_str.clone(),
            day_label: slot.day_label.clone(),
            day_of_week: slot.day_of_week,
            year: slot.date.year(),
            month: slot.date.month(),
            time: slot.time.clone(),
        }
    }
}
