pub mod booking;
pub mod court;
pub mod opening_rule;
pub mod venue;
