use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub locality: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub name: String,
    /// Free-form surface type, e.g. "5-a-side" or "padel".
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub address: String,
    pub locality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourtRequest {
    pub venue_id: Uuid,
    pub name: String,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub locality: Option<String>,
}

impl UpdateVenueRequest {
    pub fn apply_to(&self, venue: &Venue) -> Venue {
        Venue {
            name: self.name.as_deref().map(str::trim).unwrap_or(&venue.name).to_string(),
            address: self.address.clone().unwrap_or_else(|| venue.address.clone()),
            locality: self.locality.clone().unwrap_or_else(|| venue.locality.clone()),
            ..venue.clone()
        }
    }
}

/// Partial court update. An empty `kind` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourtRequest {
    pub venue_id: Option<Uuid>,
    pub name: Option<String>,
    pub kind: Option<String>,
}

impl UpdateCourtRequest {
    pub fn apply_to(&self, court: &Court) -> Court {
        let kind = match self.kind.as_deref().map(str::trim) {
            Some("") => None,
            Some(kind) => Some(kind.to_string()),
            None => court.kind.clone(),
        };

        Court {
            venue_id: self.venue_id.unwrap_or(court.venue_id),
            name: self.name.as_deref().map(str::trim).unwrap_or(&court.name).to_string(),
            kind,
            ..court.clone()
        }
    }
}

/// Optional filters when listing courts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourtFilter {
    pub venue_id: Option<Uuid>,
    pub kind: Option<String>,
    /// Matches the locality of the court's venue.
    pub locality: Option<String>,
}

impl CourtFilter {
    /// `venue` is the court's venue, when known.
    pub fn matches(&self, court: &Court, venue: Option<&Venue>) -> bool {
        self.venue_id.is_none_or(|venue_id| court.venue_id == venue_id)
            && self
                .kind
                .as_deref()
                .is_none_or(|kind| court.kind.as_deref() == Some(kind))
            && self
                .locality
                .as_deref()
                .is_none_or(|locality| venue.is_some_and(|venue| venue.locality == locality))
    }
}
