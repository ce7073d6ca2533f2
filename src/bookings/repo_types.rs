use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Booking record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: Uuid,
    pub listing_id: Uuid,
    pub renter_name: String,
    pub start_date: Date,
    pub end_date: Date, // exclusive
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Booking {
    /// Half-open `[start, end)` ranges, so a checkout day can be the next checkin.
    pub fn overlaps(&self, start: Date, end: Date) -> bool {
        self.start_date < end && start < self.end_date
    }
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub listing_id: Uuid,
    pub renter_name: String,
    pub start_date: Date,
    pub end_date: Date,
}
