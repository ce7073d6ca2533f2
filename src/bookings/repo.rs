use sqlx::PgPool;
use uuid::Uuid;

use crate::bookings::repo_types::{Booking, NewBooking};

pub async fn insert(db: &PgPool, new: &NewBooking) -> Result<Booking, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (booking_id, listing_id, renter_name, start_date, end_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING booking_id, listing_id, renter_name, start_date, end_date, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.listing_id)
    .bind(&new.renter_name)
    .bind(new.start_date)
    .bind(new.end_date)
    .fetch_one(db)
    .await
}

pub async fn list_by_listing(db: &PgPool, listing_id: Uuid) -> Result<Vec<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        r#"
        SELECT booking_id, listing_id, renter_name, start_date, end_date, created_at
        FROM bookings
        WHERE listing_id = $1
        ORDER BY start_date, booking_id
        "#,
    )
    .bind(listing_id)
    .fetch_all(db)
    .await
}

/// Bookings on any listing the owner created.
pub async fn list_by_owner(db: &PgPool, owner_id: Uuid) -> Result<Vec<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        r#"
        SELECT b.booking_id, b.listing_id, b.renter_name, b.start_date, b.end_date, b.created_at
        FROM bookings b
        JOIN listings l ON l.listing_id = b.listing_id
        WHERE l.owner_id = $1
        ORDER BY b.start_date, b.booking_id
        "#,
    )
    .bind(owner_id)
    .fetch_all(db)
    .await
}
