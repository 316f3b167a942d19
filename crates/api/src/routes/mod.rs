pub mod availability;
pub mod bookings;
pub mod courts;
pub mod health;
pub mod opening_rules;
