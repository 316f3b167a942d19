//! Reservation services: the availability engine driven against a
//! [`CourtStore`].
//!
//! Every path that can introduce an overlap (placing or moving a booking,
//! adding or editing an opening rule) takes the matching lock, reads the
//! schedule through the lock scope, validates, writes and commits in that
//! order. A request that loses the race for the lock re-validates against
//! the winner's committed booking and is rejected with
//! [`Rejection::Overlap`](crate::errors::Rejection::Overlap).

use chrono::{Datelike, NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::availability::{CourtSnapshot, MAX_BOOKING_MINUTES, MIN_BOOKING_MINUTES};
use crate::errors::{CourtError, CourtResult};
use crate::models::{
    booking::{Booking, BookingStatus, BookingWindow},
    opening_rule::{NewOpeningRule, OpeningRule, OpeningRuleChanges},
    slot::Slot,
    venue::{Court, CreateCourtRequest, CreateVenueRequest, UpdateCourtRequest, UpdateVenueRequest, Venue},
};
use crate::store::{CourtStore, LockKey};

async fn require_court(store: &dyn CourtStore, court_id: Uuid) -> CourtResult<Court> {
    store
        .get_court(court_id)
        .await?
        .ok_or_else(|| CourtError::NotFound(format!("Court with ID {} not found", court_id)))
}

async fn require_booking(store: &dyn CourtStore, booking_id: Uuid) -> CourtResult<Booking> {
    store
        .get_booking(booking_id)
        .await?
        .ok_or_else(|| CourtError::NotFound(format!("Booking with ID {} not found", booking_id)))
}

fn require_owner(booking: &Booking, requester: Uuid) -> CourtResult<()> {
    if booking.owner_id != requester {
        return Err(CourtError::Authorization(
            "Only the owner of a booking can change it".to_string(),
        ));
    }
    Ok(())
}

fn require_reschedulable(booking: &Booking) -> CourtResult<()> {
    if !booking.is_confirmed() {
        return Err(CourtError::Validation(format!(
            "Only confirmed bookings can be rescheduled, this one is {}",
            booking.status
        )));
    }
    Ok(())
}

async fn require_venue(store: &dyn CourtStore, venue_id: Uuid) -> CourtResult<Venue> {
    store
        .get_venue(venue_id)
        .await?
        .ok_or_else(|| CourtError::NotFound(format!("Venue with ID {} not found", venue_id)))
}

fn require_name(field: &str, value: &str) -> CourtResult<()> {
    if value.trim().is_empty() {
        return Err(CourtError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

pub async fn register_venue(store: &dyn CourtStore, request: CreateVenueRequest) -> CourtResult<Venue> {
    require_name("Venue name", &request.name)?;

    let venue = Venue {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        address: request.address,
        locality: request.locality,
        created_at: Utc::now(),
    };
    store.create_venue(&venue).await?;

    info!(venue_id = %venue.id, name = %venue.name, "Venue registered");
    Ok(venue)
}

pub async fn register_court(store: &dyn CourtStore, request: CreateCourtRequest) -> CourtResult<Court> {
    require_name("Court name", &request.name)?;

    require_venue(store, request.venue_id).await?;

    let court = Court {
        id: Uuid::new_v4(),
        venue_id: request.venue_id,
        name: request.name.trim().to_string(),
        kind: request.kind.filter(|kind| !kind.trim().is_empty()),
        created_at: Utc::now(),
    };
    store.create_court(&court).await?;

    info!(court_id = %court.id, venue_id = %court.venue_id, "Court registered");
    Ok(court)
}

pub async fn update_venue(store: &dyn CourtStore, venue_id: Uuid, request: UpdateVenueRequest) -> CourtResult<Venue> {
    let current = require_venue(store, venue_id).await?;
    let venue = request.apply_to(&current);
    require_name("Venue name", &venue.name)?;

    store.update_venue(&venue).await?;

    info!(%venue_id, name = %venue.name, "Venue updated");
    Ok(venue)
}

/// Renames a court, changes its kind or moves it to another venue. Opening
/// rules and bookings stay attached to the court.
pub async fn update_court(store: &dyn CourtStore, court_id: Uuid, request: UpdateCourtRequest) -> CourtResult<Court> {
    let current = require_court(store, court_id).await?;
    let court = request.apply_to(&current);
    require_name("Court name", &court.name)?;

    if court.venue_id != current.venue_id {
        require_venue(store, court.venue_id).await?;
    }

    store.update_court(&court).await?;

    info!(%court_id, venue_id = %court.venue_id, "Court updated");
    Ok(court)
}

/// Free slots of a court on `date`.
///
/// Reads without locking; the result is for display only and must not be
/// trusted at commit time.
pub async fn available_slots(
    store: &dyn CourtStore,
    court_id: Uuid,
    date: NaiveDate,
    duration_minutes: i64,
) -> CourtResult<Vec<Slot>> {
    if !(MIN_BOOKING_MINUTES..=MAX_BOOKING_MINUTES).contains(&duration_minutes) {
        return Err(CourtError::Validation(format!(
            "Slot duration must be between {} and {} minutes",
            MIN_BOOKING_MINUTES, MAX_BOOKING_MINUTES
        )));
    }

    require_court(store, court_id).await?;
    let rules = store.list_opening_rules(court_id).await?;
    let bookings = store.list_bookings(court_id, date).await?;

    let slots: Vec<Slot> = CourtSnapshot::new(court_id, &rules, &bookings)
        .generate_slots(date, duration_minutes)
        .collect();

    debug!(%court_id, %date, duration_minutes, count = slots.len(), "Generated slots");
    Ok(slots)
}

/// Places a confirmed booking for `owner_id` after validating it under the
/// (court, date) lock.
pub async fn place_booking(
    store: &dyn CourtStore,
    court_id: Uuid,
    owner_id: Uuid,
    window: BookingWindow,
    today: NaiveDate,
) -> CourtResult<Booking> {
    require_court(store, court_id).await?;

    let mut tx = store
        .lock(LockKey::CourtDay {
            court_id,
            date: window.date,
        })
        .await?;

    let rules = tx.opening_rules(court_id, window.date.weekday()).await?;
    let bookings = tx.bookings_for_day(court_id, window.date).await?;

    if let Err(rejection) = CourtSnapshot::new(court_id, &rules, &bookings).validate_booking(
        window.date,
        window.start_time,
        window.end_time,
        today,
        None,
    ) {
        warn!(%court_id, date = %window.date, kind = rejection.kind(), "Booking rejected");
        return Err(rejection.into());
    }

    let now = Utc::now();
    let booking = Booking {
        id: Uuid::new_v4(),
        court_id,
        owner_id,
        date: window.date,
        start_time: window.start_time,
        end_time: window.end_time,
        status: BookingStatus::Confirmed,
        notes: window.notes,
        created_at: now,
        updated_at: now,
    };

    tx.insert_booking(&booking).await?;
    tx.commit().await?;

    info!(
        booking_id = %booking.id,
        %court_id,
        date = %booking.date,
        start = %booking.start_time,
        end = %booking.end_time,
        minutes = booking.duration_minutes(),
        "Booking placed"
    );
    Ok(booking)
}

/// Moves a confirmed booking to a new date or time range.
///
/// The booking is re-validated under the lock of its new (court, date),
/// ignoring its own current interval.
pub async fn reschedule_booking(
    store: &dyn CourtStore,
    booking_id: Uuid,
    requester: Uuid,
    window: BookingWindow,
    today: NaiveDate,
) -> CourtResult<Booking> {
    let current = require_booking(store, booking_id).await?;
    require_owner(&current, requester)?;
    require_reschedulable(&current)?;

    let court_id = current.court_id;
    let mut tx = store
        .lock(LockKey::CourtDay {
            court_id,
            date: window.date,
        })
        .await?;

    // The booking may have been cancelled or completed while we waited.
    let current = tx
        .booking(booking_id)
        .await?
        .ok_or_else(|| CourtError::NotFound(format!("Booking with ID {} not found", booking_id)))?;
    require_reschedulable(&current)?;

    let rules = tx.opening_rules(court_id, window.date.weekday()).await?;
    let bookings = tx.bookings_for_day(court_id, window.date).await?;

    if let Err(rejection) = CourtSnapshot::new(court_id, &rules, &bookings).validate_booking(
        window.date,
        window.start_time,
        window.end_time,
        today,
        Some(booking_id),
    ) {
        warn!(%booking_id, kind = rejection.kind(), "Reschedule rejected");
        return Err(rejection.into());
    }

    let updated = Booking {
        date: window.date,
        start_time: window.start_time,
        end_time: window.end_time,
        notes: window.notes,
        updated_at: Utc::now(),
        ..current
    };

    tx.update_booking(&updated).await?;
    tx.commit().await?;

    info!(%booking_id, date = %updated.date, start = %updated.start_time, "Booking rescheduled");
    Ok(updated)
}

async fn transition_booking(
    store: &dyn CourtStore,
    booking: &Booking,
    next: BookingStatus,
) -> CourtResult<Booking> {
    if !booking.status.can_transition_to(next) {
        return Err(CourtError::Validation(format!(
            "Booking cannot move from {} to {}",
            booking.status, next
        )));
    }

    let updated = store.set_booking_status(booking.id, next).await?;
    info!(booking_id = %booking.id, status = %next, "Booking status changed");
    Ok(updated)
}

/// Cancels a booking on behalf of its owner. A plain status update, no
/// schedule lock is needed since cancelling can only free time.
pub async fn cancel_booking(store: &dyn CourtStore, booking_id: Uuid, requester: Uuid) -> CourtResult<Booking> {
    let booking = require_booking(store, booking_id).await?;
    require_owner(&booking, requester)?;
    transition_booking(store, &booking, BookingStatus::Cancelled).await
}

pub async fn complete_booking(store: &dyn CourtStore, booking_id: Uuid) -> CourtResult<Booking> {
    let booking = require_booking(store, booking_id).await?;
    transition_booking(store, &booking, BookingStatus::Completed).await
}

pub async fn purge_booking(store: &dyn CourtStore, booking_id: Uuid) -> CourtResult<()> {
    if !store.purge_booking(booking_id).await? {
        return Err(CourtError::NotFound(format!(
            "Booking with ID {} not found",
            booking_id
        )));
    }

    warn!(%booking_id, "Booking purged");
    Ok(())
}

pub async fn add_opening_rule(store: &dyn CourtStore, rule: NewOpeningRule) -> CourtResult<OpeningRule> {
    require_court(store, rule.court_id).await?;

    let mut tx = store
        .lock(LockKey::CourtWeekday {
            court_id: rule.court_id,
            weekday: rule.weekday,
        })
        .await?;

    let existing = tx.opening_rules(rule.court_id, rule.weekday).await?;
    CourtSnapshot::new(rule.court_id, &existing, &[]).validate_opening_rule(
        rule.weekday,
        rule.start_time,
        rule.end_time,
        None,
    )?;

    let rule = OpeningRule {
        id: Uuid::new_v4(),
        court_id: rule.court_id,
        weekday: rule.weekday,
        start_time: rule.start_time,
        end_time: rule.end_time,
        active: rule.active,
    };

    tx.insert_opening_rule(&rule).await?;
    tx.commit().await?;

    info!(
        rule_id = %rule.id,
        court_id = %rule.court_id,
        weekday = %rule.weekday,
        start = %rule.start_time,
        end = %rule.end_time,
        "Opening rule added"
    );
    Ok(rule)
}

pub async fn update_opening_rule(
    store: &dyn CourtStore,
    rule_id: Uuid,
    changes: OpeningRuleChanges,
) -> CourtResult<OpeningRule> {
    let current = store
        .get_opening_rule(rule_id)
        .await?
        .ok_or_else(|| CourtError::NotFound(format!("Opening rule with ID {} not found", rule_id)))?;
    let updated = changes.apply_to(&current);

    let mut tx = store
        .lock(LockKey::CourtWeekday {
            court_id: updated.court_id,
            weekday: updated.weekday,
        })
        .await?;

    let existing = tx.opening_rules(updated.court_id, updated.weekday).await?;
    CourtSnapshot::new(updated.court_id, &existing, &[]).validate_opening_rule(
        updated.weekday,
        updated.start_time,
        updated.end_time,
        Some(rule_id),
    )?;

    tx.update_opening_rule(&updated).await?;
    tx.commit().await?;

    info!(%rule_id, active = updated.active, "Opening rule updated");
    Ok(updated)
}
