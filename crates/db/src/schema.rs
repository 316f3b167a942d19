use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create venues table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(100) NOT NULL,
            address TEXT NOT NULL,
            locality VARCHAR(100) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create courts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courts (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            venue_id UUID NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
            name VARCHAR(100) NOT NULL,
            kind VARCHAR(50) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create opening_rules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS opening_rules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            court_id UUID NOT NULL REFERENCES courts(id) ON DELETE CASCADE,
            weekday SMALLINT NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_weekday CHECK (weekday BETWEEN 0 AND 6),
            CONSTRAINT valid_rule_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            court_id UUID NOT NULL REFERENCES courts(id) ON DELETE CASCADE,
            owner_id UUID NOT NULL,
            booking_date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'confirmed',
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_booking_range CHECK (end_time > start_time),
            CONSTRAINT valid_booking_status CHECK (status IN ('confirmed', 'cancelled', 'completed'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_courts_venue_id ON courts(venue_id)",
        "CREATE INDEX IF NOT EXISTS idx_opening_rules_court_weekday ON opening_rules(court_id, weekday)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_court_date ON bookings(court_id, booking_date)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_owner_id ON bookings(owner_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
