use async_trait::async_trait;
use chrono::NaiveDate;
use courtbook_core::{
    errors::CourtResult,
    models::{
        booking::{Booking, BookingStatus},
        opening_rule::OpeningRule,
        venue::{Court, CourtFilter, Venue},
    },
    store::{CourtStore, LockKey, ScheduleTx},
};
use mockall::mock;
use uuid::Uuid;

// Mock store for testing failure paths
mock! {
    pub Store {}

    #[async_trait]
    impl CourtStore for Store {
        async fn create_venue(&self, venue: &Venue) -> CourtResult<()>;
        async fn list_venues(&self) -> CourtResult<Vec<Venue>>;
        async fn get_venue(&self, id: Uuid) -> CourtResult<Option<Venue>>;
        async fn update_venue(&self, venue: &Venue) -> CourtResult<()>;
        async fn create_court(&self, court: &Court) -> CourtResult<()>;
        async fn get_court(&self, id: Uuid) -> CourtResult<Option<Court>>;
        async fn update_court(&self, court: &Court) -> CourtResult<()>;
        async fn list_courts(&self, filter: &CourtFilter) -> CourtResult<Vec<Court>>;
        async fn get_opening_rule(&self, id: Uuid) -> CourtResult<Option<OpeningRule>>;
        async fn list_opening_rules(&self, court_id: Uuid) -> CourtResult<Vec<OpeningRule>>;
        async fn get_booking(&self, id: Uuid) -> CourtResult<Option<Booking>>;
        async fn list_bookings(&self, court_id: Uuid, date: NaiveDate) -> CourtResult<Vec<Booking>>;
        async fn set_booking_status(&self, id: Uuid, status: BookingStatus) -> CourtResult<Booking>;
        async fn purge_booking(&self, id: Uuid) -> CourtResult<bool>;
        async fn lock(&self, key: LockKey) -> CourtResult<Box<dyn ScheduleTx>>;
    }
}
