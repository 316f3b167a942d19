//! Persistence seam used by the reservation services.
//!
//! Reads that only feed display (slot lists, booking lists) go straight to
//! the store and may observe a stale snapshot. Writes that must not create
//! overlaps go through a [`ScheduleTx`] obtained from [`CourtStore::lock`],
//! which serialises all writers of the same key until the scope is committed
//! or dropped.

use async_trait::async_trait;
use chrono::{NaiveDate, Weekday};
use uuid::Uuid;

use crate::errors::CourtResult;
use crate::models::{
    booking::{Booking, BookingStatus},
    opening_rule::OpeningRule,
    venue::{Court, CourtFilter, Venue},
};

/// Key of a lock scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockKey {
    /// Guards the confirmed bookings of one court on one date.
    CourtDay { court_id: Uuid, date: NaiveDate },
    /// Guards the opening rules of one court on one weekday.
    CourtWeekday { court_id: Uuid, weekday: Weekday },
}

impl LockKey {
    /// Text form used to derive database advisory lock ids.
    pub fn as_lock_name(&self) -> String {
        match self {
            LockKey::CourtDay { court_id, date } => format!("court-day:{court_id}:{date}"),
            LockKey::CourtWeekday { court_id, weekday } => {
                format!("court-weekday:{court_id}:{}", weekday.num_days_from_monday())
            }
        }
    }
}

/// An exclusive read-validate-write scope.
///
/// Writes become visible to other readers only after [`ScheduleTx::commit`].
/// Dropping the scope discards pending writes and releases the lock.
#[async_trait]
pub trait ScheduleTx: Send {
    async fn opening_rules(&mut self, court_id: Uuid, weekday: Weekday) -> CourtResult<Vec<OpeningRule>>;

    async fn bookings_for_day(&mut self, court_id: Uuid, date: NaiveDate) -> CourtResult<Vec<Booking>>;

    /// Current state of one booking, read inside the scope.
    async fn booking(&mut self, id: Uuid) -> CourtResult<Option<Booking>>;

    async fn insert_booking(&mut self, booking: &Booking) -> CourtResult<()>;

    /// Replaces the date, times and notes of an existing booking. Status and
    /// ownership are left untouched. Fails with `Validation` when the booking
    /// is no longer confirmed at write time.
    async fn update_booking(&mut self, booking: &Booking) -> CourtResult<()>;

    async fn insert_opening_rule(&mut self, rule: &OpeningRule) -> CourtResult<()>;

    async fn update_opening_rule(&mut self, rule: &OpeningRule) -> CourtResult<()>;

    async fn commit(self: Box<Self>) -> CourtResult<()>;
}

#[async_trait]
pub trait CourtStore: Send + Sync {
    async fn create_venue(&self, venue: &Venue) -> CourtResult<()>;

    async fn list_venues(&self) -> CourtResult<Vec<Venue>>;

    async fn get_venue(&self, id: Uuid) -> CourtResult<Option<Venue>>;

    async fn update_venue(&self, venue: &Venue) -> CourtResult<()>;

    async fn create_court(&self, court: &Court) -> CourtResult<()>;

    async fn get_court(&self, id: Uuid) -> CourtResult<Option<Court>>;

    async fn update_court(&self, court: &Court) -> CourtResult<()>;

    async fn list_courts(&self, filter: &CourtFilter) -> CourtResult<Vec<Court>>;

    async fn get_opening_rule(&self, id: Uuid) -> CourtResult<Option<OpeningRule>>;

    /// All rules of a court, active or not, ordered by weekday then start.
    async fn list_opening_rules(&self, court_id: Uuid) -> CourtResult<Vec<OpeningRule>>;

    async fn get_booking(&self, id: Uuid) -> CourtResult<Option<Booking>>;

    /// Every booking of the court on `date` regardless of status, ordered by
    /// start time.
    async fn list_bookings(&self, court_id: Uuid, date: NaiveDate) -> CourtResult<Vec<Booking>>;

    /// Moves a confirmed booking to `status`. The check and the write are one
    /// step, so of two racing transitions only the first wins; the other gets
    /// `Validation`.
    async fn set_booking_status(&self, id: Uuid, status: BookingStatus) -> CourtResult<Booking>;

    /// Hard delete. Returns false when nothing was removed.
    async fn purge_booking(&self, id: Uuid) -> CourtResult<bool>;

    async fn lock(&self, key: LockKey) -> CourtResult<Box<dyn ScheduleTx>>;
}
