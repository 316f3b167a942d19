//! # Availability Engine
//!
//! Computes free slots for a court and validates proposed bookings and
//! opening rules against an explicit snapshot of the court's schedule.
//!
//! All intervals are half-open: `[start, end)`. Two intervals overlap iff
//! `a_start < b_end && b_start < a_end`, so bookings that merely touch at a
//! boundary (one ends at 11:00, the next starts at 11:00) do not conflict.
//!
//! The engine never writes. A booking that passes [`CourtSnapshot::validate_booking`]
//! on a snapshot read outside a lock may still conflict at commit time; the
//! reservation services re-run the validation inside a lock scope before
//! persisting.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use uuid::Uuid;

use crate::errors::Rejection;
use crate::models::{booking::Booking, opening_rule::OpeningRule, slot::Slot};

/// Distance between consecutive candidate start times.
pub const SLOT_STEP_MINUTES: i64 = 30;
pub const MIN_BOOKING_MINUTES: i64 = 30;
pub const MAX_BOOKING_MINUTES: i64 = 240;
/// Slot length used when a caller does not ask for one.
pub const DEFAULT_SLOT_MINUTES: i64 = 90;

/// Half-open interval overlap test.
pub fn overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && b_start < a_end
}

/// Adds minutes to a time of day. Returns `None` when the result would
/// wrap past midnight.
fn add_minutes(time: NaiveTime, minutes: i64) -> Option<NaiveTime> {
    let (end, wrapped_secs) = time.overflowing_add_signed(Duration::minutes(minutes));
    (wrapped_secs == 0).then_some(end)
}

/// A read-only view of one court's opening rules and bookings.
///
/// The slices may contain entries for other courts, other weekdays, inactive
/// rules or non-confirmed bookings; every check filters them itself.
#[derive(Debug, Clone, Copy)]
pub struct CourtSnapshot<'a> {
    court_id: Uuid,
    rules: &'a [OpeningRule],
    bookings: &'a [Booking],
}

impl<'a> CourtSnapshot<'a> {
    pub fn new(court_id: Uuid, rules: &'a [OpeningRule], bookings: &'a [Booking]) -> Self {
        Self {
            court_id,
            rules,
            bookings,
        }
    }

    pub fn court_id(&self) -> Uuid {
        self.court_id
    }

    fn active_rules(&self, weekday: Weekday) -> impl Iterator<Item = &'a OpeningRule> + 'a {
        let court_id = self.court_id;
        self.rules
            .iter()
            .filter(move |rule| rule.court_id == court_id && rule.weekday == weekday && rule.active)
    }

    fn confirmed_bookings(&self, date: NaiveDate) -> impl Iterator<Item = &'a Booking> + 'a {
        let court_id = self.court_id;
        self.bookings
            .iter()
            .filter(move |booking| booking.court_id == court_id && booking.date == date && booking.is_confirmed())
    }

    /// Lists the free slots of `duration_minutes` on `date`, ordered by start
    /// time.
    ///
    /// Candidates start at each active rule's opening time and advance in
    /// [`SLOT_STEP_MINUTES`] steps until a slot would run past the rule's
    /// closing time. Candidates overlapping a confirmed booking are skipped.
    /// The returned iterator is lazy and holds no state beyond the snapshot,
    /// so calling this again yields the same sequence.
    pub fn generate_slots(&self, date: NaiveDate, duration_minutes: i64) -> Slots<'a> {
        let mut rules: Vec<&'a OpeningRule> = if duration_minutes > 0 {
            self.active_rules(date.weekday()).collect()
        } else {
            Vec::new()
        };
        rules.sort_by_key(|rule| rule.start_time);

        let bookings = if rules.is_empty() {
            Vec::new()
        } else {
            self.confirmed_bookings(date).collect()
        };

        Slots {
            rules,
            bookings,
            duration_minutes,
            rule_index: 0,
            cursor: None,
        }
    }

    /// Checks whether `[start_time, end_time)` on `date` can be booked.
    ///
    /// Checks run in a fixed order and stop at the first failure: range,
    /// duration, past date, opening hours present, fits in a single window,
    /// and finally overlap with confirmed bookings other than
    /// `excluding_booking_id`.
    pub fn validate_booking(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        today: NaiveDate,
        excluding_booking_id: Option<Uuid>,
    ) -> Result<(), Rejection> {
        if start_time >= end_time {
            return Err(Rejection::InvalidRange);
        }

        let seconds = end_time.signed_duration_since(start_time).num_seconds();
        if seconds < MIN_BOOKING_MINUTES * 60 || seconds > MAX_BOOKING_MINUTES * 60 {
            return Err(Rejection::InvalidDuration {
                minutes: seconds / 60,
            });
        }

        if date < today {
            return Err(Rejection::PastDate);
        }

        let weekday = date.weekday();
        let mut windows = self.active_rules(weekday).peekable();
        if windows.peek().is_none() {
            return Err(Rejection::NoOpeningHours { weekday });
        }

        // Contiguous windows are not merged.
        if !windows.any(|rule| start_time >= rule.start_time && end_time <= rule.end_time) {
            return Err(Rejection::OutsideOpeningHours);
        }

        let conflict = self
            .confirmed_bookings(date)
            .filter(|booking| Some(booking.id) != excluding_booking_id)
            .find(|booking| overlaps(start_time, end_time, booking.start_time, booking.end_time));

        match conflict {
            Some(booking) => Err(Rejection::Overlap(Box::new(booking.clone()))),
            None => Ok(()),
        }
    }

    /// Checks that a rule window is well formed and does not overlap another
    /// active rule of the same court and weekday.
    pub fn validate_opening_rule(
        &self,
        weekday: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
        excluding_rule_id: Option<Uuid>,
    ) -> Result<(), Rejection> {
        if start_time >= end_time {
            return Err(Rejection::InvalidRange);
        }

        let conflict = self
            .active_rules(weekday)
            .filter(|rule| Some(rule.id) != excluding_rule_id)
            .find(|rule| overlaps(start_time, end_time, rule.start_time, rule.end_time));

        match conflict {
            Some(rule) => Err(Rejection::RuleOverlap(Box::new(rule.clone()))),
            None => Ok(()),
        }
    }
}

/// Lazy sequence of free slots produced by [`CourtSnapshot::generate_slots`].
#[derive(Debug, Clone)]
pub struct Slots<'a> {
    rules: Vec<&'a OpeningRule>,
    bookings: Vec<&'a Booking>,
    duration_minutes: i64,
    rule_index: usize,
    cursor: Option<NaiveTime>,
}

impl Slots<'_> {
    fn is_free(&self, start: NaiveTime, end: NaiveTime) -> bool {
        !self
            .bookings
            .iter()
            .any(|booking| overlaps(start, end, booking.start_time, booking.end_time))
    }
}

impl Iterator for Slots<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        while let Some(rule) = self.rules.get(self.rule_index).copied() {
            let start = self.cursor.unwrap_or(rule.start_time);

            let end = match add_minutes(start, self.duration_minutes) {
                Some(end) if end <= rule.end_time => end,
                // Past closing time: move on to the next window.
                _ => {
                    self.rule_index += 1;
                    self.cursor = None;
                    continue;
                }
            };

            match add_minutes(start, SLOT_STEP_MINUTES) {
                Some(next) => self.cursor = Some(next),
                None => {
                    self.rule_index += 1;
                    self.cursor = None;
                }
            }

            if self.is_free(start, end) {
                return Some(Slot {
                    start_time: start,
                    end_time: end,
                    available: true,
                });
            }
        }

        None
    }
}
