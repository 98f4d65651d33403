pub mod account;
pub mod availability;
pub mod booking;
pub mod clinic;
pub mod menu;
pub mod reservation;
pub mod slot;

pub use account::{AccountStatus, UserAccount};
pub use availability::{availability, AvailabilityStatus};
pub use booking::{BookingDraft, BookingRecord};
pub use clinic::ClinicInfo;
pub use menu::MenuOption;
pub use reservation::{Reservation, ReservationStatus, StatusFilter};
pub use slot::{CalendarSlot, SelectedSlot, TIME_SLOTS};
