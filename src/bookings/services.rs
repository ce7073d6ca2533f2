use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    bookings::{
        dto::BookingRequest,
        repo_types::{Booking, NewBooking},
    },
    error::AppError,
    store::{MarketStore, StoreError},
};

fn listing_not_found(id: Uuid) -> AppError {
    AppError::ListingNotFound(format!("Listing {id} not found"))
}

/// Books a listing for a date range. Overlap is checked here, not under a lock.
pub async fn request_booking(
    store: &dyn MarketStore,
    listing_id: Uuid,
    req: BookingRequest,
) -> Result<Booking, AppError> {
    let renter_name = req.renter_name.trim();
    if renter_name.is_empty() {
        return Err(AppError::InvalidBooking("Renter name is required".into()));
    }
    if req.end_date <= req.start_date {
        return Err(AppError::InvalidBooking(
            "End date must be after start date".into(),
        ));
    }

    if store.find_listing_by_id(listing_id).await?.is_none() {
        return Err(listing_not_found(listing_id));
    }

    let existing = store.list_bookings_by_listing(listing_id).await?;
    if existing.iter().any(|b| b.overlaps(req.start_date, req.end_date)) {
        warn!(%listing_id, start = %req.start_date, end = %req.end_date, "booking overlaps");
        return Err(AppError::InvalidBooking(
            "Listing is already booked for those dates".into(),
        ));
    }

    let booking = store
        .insert_booking(NewBooking {
            listing_id,
            renter_name: renter_name.to_string(),
            start_date: req.start_date,
            end_date: req.end_date,
        })
        .await
        .map_err(|e| match e {
            StoreError::MissingReference => listing_not_found(listing_id),
            other => other.into(),
        })?;

    info!(booking_id = %booking.booking_id, %listing_id, "booking created");
    Ok(booking)
}

pub async fn get_bookings_by_owner_id(
    store: &dyn MarketStore,
    owner_id: Uuid,
) -> Result<Vec<Booking>, AppError> {
    Ok(store.list_bookings_by_owner(owner_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::repo_types::NewListing;
    use crate::owners::repo_types::NewOwner;
    use crate::store::MemoryStore;
    use time::macros::date;

    async fn seed(store: &MemoryStore) -> (Uuid, Uuid) {
        let owner = store
            .insert_owner(NewOwner {
                username: "alice".into(),
                password_hash: "hash".into(),
                email: "a@example.com".into(),
            })
            .await
            .unwrap();
        let listing = store
            .insert_listing(NewListing {
                owner_id: owner.id(),
                title: "Cabin".into(),
                description: String::new(),
                location: String::new(),
                price_per_night: 100,
                max_guests: 2,
            })
            .await
            .unwrap();
        (owner.id(), listing.listing_id)
    }

    fn req(start: time::Date, end: time::Date) -> BookingRequest {
        BookingRequest {
            renter_name: "Bob".into(),
            start_date: start,
            end_date: end,
        }
    }

    #[tokio::test]
    async fn bookings_are_visible_to_the_listing_owner() {
        let store = MemoryStore::new();
        let (owner_id, listing_id) = seed(&store).await;
        let booking = request_booking(&store, listing_id, req(date!(2024 - 07 - 01), date!(2024 - 07 - 04)))
            .await
            .unwrap();

        let seen = get_bookings_by_owner_id(&store, owner_id).await.unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].booking_id, booking.booking_id);
        assert!(get_bookings_by_owner_id(&store, Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_overlapping_and_inverted_ranges() {
        let store = MemoryStore::new();
        let (_, listing_id) = seed(&store).await;
        request_booking(&store, listing_id, req(date!(2024 - 07 - 01), date!(2024 - 07 - 04)))
            .await
            .unwrap();

        let err = request_booking(&store, listing_id, req(date!(2024 - 07 - 03), date!(2024 - 07 - 06)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidBooking(_)));

        let err = request_booking(&store, listing_id, req(date!(2024 - 07 - 10), date!(2024 - 07 - 10)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidBooking(_)));

        // checkout day is free for the next guest
        request_booking(&store, listing_id, req(date!(2024 - 07 - 04), date!(2024 - 07 - 06)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_listing_is_not_found() {
        let store = MemoryStore::new();
        let err = request_booking(&store, Uuid::new_v4(), req(date!(2024 - 07 - 01), date!(2024 - 07 - 02)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ListingNotFound(_)));
    }
}
