use crate::models::DbVenue;
use courtbook_core::models::venue::Venue;
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_venue<'e, E: PgExecutor<'e>>(executor: E, venue: &Venue) -> Result<DbVenue> {
    let venue = sqlx::query_as::<_, DbVenue>(
        r#"
        INSERT INTO venues (id, name, address, locality, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, address, locality, created_at
        "#,
    )
    .bind(venue.id)
    .bind(&venue.name)
    .bind(&venue.address)
    .bind(&venue.locality)
    .bind(venue.created_at)
    .fetch_one(executor)
    .await?;

    Ok(venue)
}

pub async fn get_venue_by_id<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<DbVenue>> {
    let venue = sqlx::query_as::<_, DbVenue>(
        r#"
        SELECT id, name, address, locality, created_at
        FROM venues
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(venue)
}

pub async fn list_venues<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<DbVenue>> {
    let venues = sqlx::query_as::<_, DbVenue>(
        r#"
        SELECT id, name, address, locality, created_at
        FROM venues
        ORDER BY name ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(venues)
}

pub async fn update_venue<'e, E: PgExecutor<'e>>(executor: E, venue: &Venue) -> Result<Option<DbVenue>> {
    let updated = sqlx::query_as::<_, DbVenue>(
        r#"
        UPDATE venues
        SET name = $2, address = $3, locality = $4
        WHERE id = $1
        RETURNING id, name, address, locality, created_at
        "#,
    )
    .bind(venue.id)
    .bind(&venue.name)
    .bind(&venue.address)
    .bind(&venue.locality)
    .fetch_optional(executor)
    .await?;

    Ok(updated)
}
