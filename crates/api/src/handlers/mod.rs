pub mod availability;
pub mod booking;
pub mod opening_rule;
pub mod venue;
