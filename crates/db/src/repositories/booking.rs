use crate::models::DbBooking;
use chrono::{NaiveDate, Utc};
use courtbook_core::models::booking::{Booking, BookingStatus};
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_booking<'e, E: PgExecutor<'e>>(executor: E, booking: &Booking) -> Result<DbBooking> {
    tracing::debug!(
        "Creating booking: id={}, court_id={}, date={}, {}-{}",
        booking.id, booking.court_id, booking.date, booking.start_time, booking.end_time
    );

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, court_id, owner_id, booking_date, start_time, end_time, status, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, court_id, owner_id, booking_date, start_time, end_time, status, notes, created_at, updated_at
        "#,
    )
    .bind(booking.id)
    .bind(booking.court_id)
    .bind(booking.owner_id)
    .bind(booking.date)
    .bind(booking.start_time)
    .bind(booking.end_time)
    .bind(booking.status.as_str())
    .bind(booking.notes.as_deref())
    .bind(booking.created_at)
    .bind(booking.updated_at)
    .fetch_one(executor)
    .await?;

    Ok(booking)
}

/// Moves a confirmed booking to the date, times and notes carried by
/// `booking`. Returns `None` when no confirmed booking has that id.
pub async fn update_booking_window<'e, E: PgExecutor<'e>>(executor: E, booking: &Booking) -> Result<Option<DbBooking>> {
    let updated = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET booking_date = $2, start_time = $3, end_time = $4, notes = $5, updated_at = $6
        WHERE id = $1 AND status = 'confirmed'
        RETURNING id, court_id, owner_id, booking_date, start_time, end_time, status, notes, created_at, updated_at
        "#,
    )
    .bind(booking.id)
    .bind(booking.date)
    .bind(booking.start_time)
    .bind(booking.end_time)
    .bind(booking.notes.as_deref())
    .bind(booking.updated_at)
    .fetch_optional(executor)
    .await?;

    Ok(updated)
}

/// Moves a confirmed booking to `status`. Returns `None` when no confirmed
/// booking has that id.
pub async fn update_booking_status<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    status: BookingStatus,
) -> Result<Option<DbBooking>> {
    let updated = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = $2, updated_at = $3
        WHERE id = $1 AND status = 'confirmed'
        RETURNING id, court_id, owner_id, booking_date, start_time, end_time, status, notes, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(Utc::now())
    .fetch_optional(executor)
    .await?;

    Ok(updated)
}

pub async fn get_booking_by_id<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, court_id, owner_id, booking_date, start_time, end_time, status, notes, created_at, updated_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(booking)
}

pub async fn get_bookings_for_day<'e, E: PgExecutor<'e>>(
    executor: E,
    court_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, court_id, owner_id, booking_date, start_time, end_time, status, notes, created_at, updated_at
        FROM bookings
        WHERE court_id = $1 AND booking_date = $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(court_id)
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(bookings)
}

pub async fn delete_booking<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
