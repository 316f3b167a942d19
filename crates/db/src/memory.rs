//! In-process [`CourtStore`] for tests and local runs without PostgreSQL.
//!
//! Lock scopes are per-key `tokio` mutexes: two scopes with the same
//! [`LockKey`] never run at the same time, scopes with different keys do.
//! Writes made inside a scope are buffered and applied on commit. Registry
//! entries for keys nobody holds or waits on are pruned on the next `lock`.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc, Weekday};
use courtbook_core::{
    errors::{CourtError, CourtResult},
    models::{
        booking::{Booking, BookingStatus},
        opening_rule::OpeningRule,
        venue::{Court, CourtFilter, Venue},
    },
    store::{CourtStore, LockKey, ScheduleTx},
};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    venues: HashMap<Uuid, Venue>,
    courts: HashMap<Uuid, Court>,
    rules: HashMap<Uuid, OpeningRule>,
    bookings: HashMap<Uuid, Booking>,
}

impl Tables {
    fn rules_for_weekday(&self, court_id: Uuid, weekday: Weekday) -> Vec<OpeningRule> {
        let mut rules: Vec<_> = self
            .rules
            .values()
            .filter(|rule| rule.court_id == court_id && rule.weekday == weekday)
            .cloned()
            .collect();
        rules.sort_by_key(|rule| rule.start_time);
        rules
    }

    fn bookings_for_day(&self, court_id: Uuid, date: NaiveDate) -> Vec<Booking> {
        let mut bookings: Vec<_> = self
            .bookings
            .values()
            .filter(|booking| booking.court_id == court_id && booking.date == date)
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| (booking.start_time, booking.created_at));
        bookings
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    locks: Arc<Mutex<HashMap<LockKey, Arc<Mutex<()>>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourtStore for MemoryStore {
    async fn create_venue(&self, venue: &Venue) -> CourtResult<()> {
        self.tables.write().await.venues.insert(venue.id, venue.clone());
        Ok(())
    }

    async fn list_venues(&self) -> CourtResult<Vec<Venue>> {
        let mut venues: Vec<_> = self.tables.read().await.venues.values().cloned().collect();
        venues.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(venues)
    }

    async fn get_venue(&self, id: Uuid) -> CourtResult<Option<Venue>> {
        Ok(self.tables.read().await.venues.get(&id).cloned())
    }

    async fn update_venue(&self, venue: &Venue) -> CourtResult<()> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .venues
            .get_mut(&venue.id)
            .ok_or_else(|| CourtError::NotFound(format!("Venue with ID {} not found", venue.id)))?;
        *stored = venue.clone();
        Ok(())
    }

    async fn create_court(&self, court: &Court) -> CourtResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.venues.contains_key(&court.venue_id) {
            return Err(CourtError::NotFound(format!(
                "Venue with ID {} not found",
                court.venue_id
            )));
        }
        tables.courts.insert(court.id, court.clone());
        Ok(())
    }

    async fn get_court(&self, id: Uuid) -> CourtResult<Option<Court>> {
        Ok(self.tables.read().await.courts.get(&id).cloned())
    }

    async fn update_court(&self, court: &Court) -> CourtResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.venues.contains_key(&court.venue_id) {
            return Err(CourtError::NotFound(format!(
                "Venue with ID {} not found",
                court.venue_id
            )));
        }
        let stored = tables
            .courts
            .get_mut(&court.id)
            .ok_or_else(|| CourtError::NotFound(format!("Court with ID {} not found", court.id)))?;
        *stored = court.clone();
        Ok(())
    }

    async fn list_courts(&self, filter: &CourtFilter) -> CourtResult<Vec<Court>> {
        let tables = self.tables.read().await;
        let mut courts: Vec<_> = tables
            .courts
            .values()
            .filter(|court| filter.matches(court, tables.venues.get(&court.venue_id)))
            .cloned()
            .collect();
        courts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(courts)
    }

    async fn get_opening_rule(&self, id: Uuid) -> CourtResult<Option<OpeningRule>> {
        Ok(self.tables.read().await.rules.get(&id).cloned())
    }

    async fn list_opening_rules(&self, court_id: Uuid) -> CourtResult<Vec<OpeningRule>> {
        let mut rules: Vec<_> = self
            .tables
            .read()
            .await
            .rules
            .values()
            .filter(|rule| rule.court_id == court_id)
            .cloned()
            .collect();
        rules.sort_by_key(|rule| (rule.weekday.num_days_from_monday(), rule.start_time));
        Ok(rules)
    }

    async fn get_booking(&self, id: Uuid) -> CourtResult<Option<Booking>> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }

    async fn list_bookings(&self, court_id: Uuid, date: NaiveDate) -> CourtResult<Vec<Booking>> {
        Ok(self.tables.read().await.bookings_for_day(court_id, date))
    }

    async fn set_booking_status(&self, id: Uuid, status: BookingStatus) -> CourtResult<Booking> {
        let mut tables = self.tables.write().await;
        let booking = tables
            .bookings
            .get_mut(&id)
            .ok_or_else(|| CourtError::NotFound(format!("Booking with ID {} not found", id)))?;
        if !booking.status.can_transition_to(status) {
            return Err(CourtError::Validation(format!(
                "Booking {} is {}, not confirmed",
                id, booking.status
            )));
        }
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn purge_booking(&self, id: Uuid) -> CourtResult<bool> {
        Ok(self.tables.write().await.bookings.remove(&id).is_some())
    }

    async fn lock(&self, key: LockKey) -> CourtResult<Box<dyn ScheduleTx>> {
        let key_lock = {
            let mut locks = self.locks.lock().await;
            // Only the registry holds an idle key.
            locks.retain(|_, key_lock| Arc::strong_count(key_lock) > 1);
            locks.entry(key).or_default().clone()
        };
        let guard = key_lock.lock_owned().await;

        Ok(Box::new(MemoryScheduleTx {
            _guard: guard,
            tables: self.tables.clone(),
            pending: Vec::new(),
        }))
    }
}

#[derive(Debug)]
enum PendingWrite {
    InsertBooking(Booking),
    UpdateBooking(Booking),
    InsertRule(OpeningRule),
    UpdateRule(OpeningRule),
}

struct MemoryScheduleTx {
    _guard: OwnedMutexGuard<()>,
    tables: Arc<RwLock<Tables>>,
    pending: Vec<PendingWrite>,
}

#[async_trait]
impl ScheduleTx for MemoryScheduleTx {
    async fn opening_rules(&mut self, court_id: Uuid, weekday: Weekday) -> CourtResult<Vec<OpeningRule>> {
        Ok(self.tables.read().await.rules_for_weekday(court_id, weekday))
    }

    async fn bookings_for_day(&mut self, court_id: Uuid, date: NaiveDate) -> CourtResult<Vec<Booking>> {
        Ok(self.tables.read().await.bookings_for_day(court_id, date))
    }

    async fn booking(&mut self, id: Uuid) -> CourtResult<Option<Booking>> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }

    async fn insert_booking(&mut self, booking: &Booking) -> CourtResult<()> {
        self.pending.push(PendingWrite::InsertBooking(booking.clone()));
        Ok(())
    }

    async fn update_booking(&mut self, booking: &Booking) -> CourtResult<()> {
        self.pending.push(PendingWrite::UpdateBooking(booking.clone()));
        Ok(())
    }

    async fn insert_opening_rule(&mut self, rule: &OpeningRule) -> CourtResult<()> {
        self.pending.push(PendingWrite::InsertRule(rule.clone()));
        Ok(())
    }

    async fn update_opening_rule(&mut self, rule: &OpeningRule) -> CourtResult<()> {
        self.pending.push(PendingWrite::UpdateRule(rule.clone()));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> CourtResult<()> {
        let MemoryScheduleTx { _guard, tables, pending } = *self;
        let mut tables = tables.write().await;

        // Check everything first so a failed commit applies nothing.
        for write in &pending {
            match write {
                PendingWrite::UpdateBooking(booking) => match tables.bookings.get(&booking.id) {
                    None => {
                        return Err(CourtError::NotFound(format!("Booking with ID {} not found", booking.id)));
                    }
                    Some(stored) if !stored.is_confirmed() => {
                        return Err(CourtError::Validation(format!(
                            "Booking {} is {}, not confirmed",
                            booking.id, stored.status
                        )));
                    }
                    Some(_) => {}
                },
                PendingWrite::UpdateRule(rule) if !tables.rules.contains_key(&rule.id) => {
                    return Err(CourtError::NotFound(format!("Opening rule with ID {} not found", rule.id)));
                }
                _ => {}
            }
        }

        for write in pending {
            match write {
                PendingWrite::InsertBooking(booking) => {
                    tables.bookings.insert(booking.id, booking);
                }
                PendingWrite::UpdateBooking(booking) => {
                    if let Some(stored) = tables.bookings.get_mut(&booking.id) {
                        stored.date = booking.date;
                        stored.start_time = booking.start_time;
                        stored.end_time = booking.end_time;
                        stored.notes = booking.notes;
                        stored.updated_at = booking.updated_at;
                    }
                }
                PendingWrite::InsertRule(rule) | PendingWrite::UpdateRule(rule) => {
                    tables.rules.insert(rule.id, rule);
                }
            }
        }

        Ok(())
    }
}
