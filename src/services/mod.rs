pub mod calendar;
pub mod handoff;
pub mod moderation;
pub mod reservations;
pub mod slot_grid;
pub mod wizard;
