//! # Courtbook Core
//!
//! Domain types, the availability engine and the reservation services of the
//! court booking service. Nothing in this crate talks to a database directly;
//! persistence is reached through the [`store::CourtStore`] trait.

pub mod availability;
pub mod errors;
pub mod models;
pub mod reservation;
pub mod store;
