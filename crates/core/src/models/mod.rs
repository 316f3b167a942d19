pub mod booking;
pub mod opening_rule;
pub mod slot;
pub mod venue;
