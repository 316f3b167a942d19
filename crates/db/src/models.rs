use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use courtbook_core::models::{
    booking::{Booking, BookingStatus},
    opening_rule::{weekday_from_index, weekday_to_index, OpeningRule},
    venue::{Court, Venue},
};
use eyre::{eyre, Report};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVenue {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub locality: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourt {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub name: String,
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOpeningRule {
    pub id: Uuid,
    pub court_id: Uuid,
    /// 0 = Monday .. 6 = Sunday
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub court_id: Uuid,
    pub owner_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbVenue> for Venue {
    fn from(row: DbVenue) -> Self {
        Venue {
            id: row.id,
            name: row.name,
            address: row.address,
            locality: row.locality,
            created_at: row.created_at,
        }
    }
}

impl From<DbCourt> for Court {
    fn from(row: DbCourt) -> Self {
        Court {
            id: row.id,
            venue_id: row.venue_id,
            name: row.name,
            kind: row.kind,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbOpeningRule> for OpeningRule {
    type Error = Report;

    fn try_from(row: DbOpeningRule) -> Result<Self, Self::Error> {
        let weekday = u8::try_from(row.weekday)
            .ok()
            .and_then(weekday_from_index)
            .ok_or_else(|| eyre!("Opening rule {} has invalid weekday {}", row.id, row.weekday))?;

        Ok(OpeningRule {
            id: row.id,
            court_id: row.court_id,
            weekday,
            start_time: row.start_time,
            end_time: row.end_time,
            active: row.active,
        })
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = Report;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookingStatus>()
            .map_err(|e| eyre!("Booking {}: {}", row.id, e))?;

        Ok(Booking {
            id: row.id,
            court_id: row.court_id,
            owner_id: row.owner_id,
            date: row.booking_date,
            start_time: row.start_time,
            end_time: row.end_time,
            status,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Column value for a rule's weekday.
pub fn weekday_column(rule: &OpeningRule) -> i16 {
    i16::from(weekday_to_index(rule.weekday))
}
