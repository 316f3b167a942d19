use crate::models::DbCourt;
use courtbook_core::models::venue::{Court, CourtFilter};
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_court<'e, E: PgExecutor<'e>>(executor: E, court: &Court) -> Result<DbCourt> {
    tracing::debug!("Creating court: id={}, venue_id={}", court.id, court.venue_id);

    let court = sqlx::query_as::<_, DbCourt>(
        r#"
        INSERT INTO courts (id, venue_id, name, kind, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, venue_id, name, kind, created_at
        "#,
    )
    .bind(court.id)
    .bind(court.venue_id)
    .bind(&court.name)
    .bind(court.kind.as_deref())
    .bind(court.created_at)
    .fetch_one(executor)
    .await?;

    Ok(court)
}

pub async fn get_court_by_id<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<DbCourt>> {
    let court = sqlx::query_as::<_, DbCourt>(
        r#"
        SELECT id, venue_id, name, kind, created_at
        FROM courts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    if court.is_none() {
        tracing::debug!("Court not found: id={}", id);
    }

    Ok(court)
}

pub async fn update_court<'e, E: PgExecutor<'e>>(executor: E, court: &Court) -> Result<Option<DbCourt>> {
    let updated = sqlx::query_as::<_, DbCourt>(
        r#"
        UPDATE courts
        SET venue_id = $2, name = $3, kind = $4
        WHERE id = $1
        RETURNING id, venue_id, name, kind, created_at
        "#,
    )
    .bind(court.id)
    .bind(court.venue_id)
    .bind(&court.name)
    .bind(court.kind.as_deref())
    .fetch_optional(executor)
    .await?;

    Ok(updated)
}

pub async fn list_courts<'e, E: PgExecutor<'e>>(executor: E, filter: &CourtFilter) -> Result<Vec<DbCourt>> {
    let courts = sqlx::query_as::<_, DbCourt>(
        r#"
        SELECT c.id, c.venue_id, c.name, c.kind, c.created_at
        FROM courts c
        JOIN venues v ON v.id = c.venue_id
        WHERE ($1::uuid IS NULL OR c.venue_id = $1)
          AND ($2::text IS NULL OR c.kind = $2)
          AND ($3::text IS NULL OR v.locality = $3)
        ORDER BY c.name ASC
        "#,
    )
    .bind(filter.venue_id)
    .bind(filter.kind.as_deref())
    .bind(filter.locality.as_deref())
    .fetch_all(executor)
    .await?;

    Ok(courts)
}
