//! PostgreSQL implementation of the [`CourtStore`] seam.
//!
//! A lock scope is a database transaction that starts by taking a
//! transaction-level advisory lock derived from the [`LockKey`]. Concurrent
//! requests for the same key queue on that lock; it is released when the
//! transaction commits or rolls back.

use async_trait::async_trait;
use chrono::{NaiveDate, Weekday};
use courtbook_core::{
    errors::{CourtError, CourtResult},
    models::{
        booking::{Booking, BookingStatus},
        opening_rule::{weekday_to_index, OpeningRule},
        venue::{Court, CourtFilter, Venue},
    },
    store::{CourtStore, LockKey, ScheduleTx},
};
use eyre::Report;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{models::DbBooking, repositories, DbPool};

fn db_error(err: impl Into<Report>) -> CourtError {
    CourtError::Database(err.into())
}

fn to_bookings(rows: Vec<DbBooking>) -> CourtResult<Vec<Booking>> {
    rows.into_iter()
        .map(Booking::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(CourtError::Database)
}

/// Error for a conditional booking write that matched no row.
fn not_confirmed(booking: Option<DbBooking>, id: Uuid) -> CourtError {
    match booking {
        None => CourtError::NotFound(format!("Booking with ID {} not found", id)),
        Some(row) => CourtError::Validation(format!("Booking {} is {}, not confirmed", id, row.status)),
    }
}

fn to_rules(rows: Vec<crate::models::DbOpeningRule>) -> CourtResult<Vec<OpeningRule>> {
    rows.into_iter()
        .map(OpeningRule::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(CourtError::Database)
}

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl CourtStore for PgStore {
    async fn create_venue(&self, venue: &Venue) -> CourtResult<()> {
        repositories::venue::create_venue(&self.pool, venue)
            .await
            .map_err(CourtError::Database)?;
        Ok(())
    }

    async fn list_venues(&self) -> CourtResult<Vec<Venue>> {
        let rows = repositories::venue::list_venues(&self.pool)
            .await
            .map_err(CourtError::Database)?;
        Ok(rows.into_iter().map(Venue::from).collect())
    }

    async fn get_venue(&self, id: Uuid) -> CourtResult<Option<Venue>> {
        let row = repositories::venue::get_venue_by_id(&self.pool, id)
            .await
            .map_err(CourtError::Database)?;
        Ok(row.map(Venue::from))
    }

    async fn update_venue(&self, venue: &Venue) -> CourtResult<()> {
        repositories::venue::update_venue(&self.pool, venue)
            .await
            .map_err(CourtError::Database)?
            .ok_or_else(|| CourtError::NotFound(format!("Venue with ID {} not found", venue.id)))?;
        Ok(())
    }

    async fn create_court(&self, court: &Court) -> CourtResult<()> {
        repositories::court::create_court(&self.pool, court)
            .await
            .map_err(CourtError::Database)?;
        Ok(())
    }

    async fn get_court(&self, id: Uuid) -> CourtResult<Option<Court>> {
        let row = repositories::court::get_court_by_id(&self.pool, id)
            .await
            .map_err(CourtError::Database)?;
        Ok(row.map(Court::from))
    }

    async fn update_court(&self, court: &Court) -> CourtResult<()> {
        repositories::court::update_court(&self.pool, court)
            .await
            .map_err(CourtError::Database)?
            .ok_or_else(|| CourtError::NotFound(format!("Court with ID {} not found", court.id)))?;
        Ok(())
    }

    async fn list_courts(&self, filter: &CourtFilter) -> CourtResult<Vec<Court>> {
        let rows = repositories::court::list_courts(&self.pool, filter)
            .await
            .map_err(CourtError::Database)?;
        Ok(rows.into_iter().map(Court::from).collect())
    }

    async fn get_opening_rule(&self, id: Uuid) -> CourtResult<Option<OpeningRule>> {
        repositories::opening_rule::get_opening_rule_by_id(&self.pool, id)
            .await
            .map_err(CourtError::Database)?
            .map(OpeningRule::try_from)
            .transpose()
            .map_err(CourtError::Database)
    }

    async fn list_opening_rules(&self, court_id: Uuid) -> CourtResult<Vec<OpeningRule>> {
        let rows = repositories::opening_rule::get_opening_rules_by_court_id(&self.pool, court_id)
            .await
            .map_err(CourtError::Database)?;
        to_rules(rows)
    }

    async fn get_booking(&self, id: Uuid) -> CourtResult<Option<Booking>> {
        repositories::booking::get_booking_by_id(&self.pool, id)
            .await
            .map_err(CourtError::Database)?
            .map(Booking::try_from)
            .transpose()
            .map_err(CourtError::Database)
    }

    async fn list_bookings(&self, court_id: Uuid, date: NaiveDate) -> CourtResult<Vec<Booking>> {
        let rows = repositories::booking::get_bookings_for_day(&self.pool, court_id, date)
            .await
            .map_err(CourtError::Database)?;
        to_bookings(rows)
    }

    async fn set_booking_status(&self, id: Uuid, status: BookingStatus) -> CourtResult<Booking> {
        let updated = repositories::booking::update_booking_status(&self.pool, id, status)
            .await
            .map_err(CourtError::Database)?;

        match updated {
            Some(row) => Booking::try_from(row).map_err(CourtError::Database),
            None => {
                let current = repositories::booking::get_booking_by_id(&self.pool, id)
                    .await
                    .map_err(CourtError::Database)?;
                Err(not_confirmed(current, id))
            }
        }
    }

    async fn purge_booking(&self, id: Uuid) -> CourtResult<bool> {
        repositories::booking::delete_booking(&self.pool, id)
            .await
            .map_err(CourtError::Database)
    }

    async fn lock(&self, key: LockKey) -> CourtResult<Box<dyn ScheduleTx>> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(key.as_lock_name())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tracing::debug!("Acquired schedule lock {}", key.as_lock_name());
        Ok(Box::new(PgScheduleTx { tx }))
    }
}

/// Transaction holding an advisory schedule lock.
pub struct PgScheduleTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ScheduleTx for PgScheduleTx {
    async fn opening_rules(&mut self, court_id: Uuid, weekday: Weekday) -> CourtResult<Vec<OpeningRule>> {
        let rows = repositories::opening_rule::get_opening_rules_for_weekday(
            &mut *self.tx,
            court_id,
            i16::from(weekday_to_index(weekday)),
        )
        .await
        .map_err(CourtError::Database)?;
        to_rules(rows)
    }

    async fn bookings_for_day(&mut self, court_id: Uuid, date: NaiveDate) -> CourtResult<Vec<Booking>> {
        let rows = repositories::booking::get_bookings_for_day(&mut *self.tx, court_id, date)
            .await
            .map_err(CourtError::Database)?;
        to_bookings(rows)
    }

    async fn booking(&mut self, id: Uuid) -> CourtResult<Option<Booking>> {
        repositories::booking::get_booking_by_id(&mut *self.tx, id)
            .await
            .map_err(CourtError::Database)?
            .map(Booking::try_from)
            .transpose()
            .map_err(CourtError::Database)
    }

    async fn insert_booking(&mut self, booking: &Booking) -> CourtResult<()> {
        repositories::booking::create_booking(&mut *self.tx, booking)
            .await
            .map_err(CourtError::Database)?;
        Ok(())
    }

    async fn update_booking(&mut self, booking: &Booking) -> CourtResult<()> {
        let updated = repositories::booking::update_booking_window(&mut *self.tx, booking)
            .await
            .map_err(CourtError::Database)?;

        if updated.is_none() {
            let current = repositories::booking::get_booking_by_id(&mut *self.tx, booking.id)
                .await
                .map_err(CourtError::Database)?;
            return Err(not_confirmed(current, booking.id));
        }
        Ok(())
    }

    async fn insert_opening_rule(&mut self, rule: &OpeningRule) -> CourtResult<()> {
        repositories::opening_rule::create_opening_rule(&mut *self.tx, rule)
            .await
            .map_err(CourtError::Database)?;
        Ok(())
    }

    async fn update_opening_rule(&mut self, rule: &OpeningRule) -> CourtResult<()> {
        repositories::opening_rule::update_opening_rule(&mut *self.tx, rule)
            .await
            .map_err(CourtError::Database)?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> CourtResult<()> {
        self.tx.commit().await.map_err(db_error)
    }
}
