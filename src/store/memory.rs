use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{MarketStore, StoreError, UniqueField};
use crate::bookings::repo_types::{Booking, NewBooking};
use crate::listings::repo_types::{Listing, NewListing};
use crate::owners::repo_types::{NewOwner, Owner, UserFields};

#[derive(Default)]
struct Tables {
    owners: Vec<Owner>,
    listings: Vec<Listing>,
    bookings: Vec<Booking>,
}

/// Process-local store with the same constraints as the SQL schema.
/// Rows are kept in insertion order, which doubles as creation order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn insert_owner(&self, new: NewOwner) -> Result<Owner, StoreError> {
        let mut t = self.tables.write().await;
        if t.owners.iter().any(|o| o.user.username == new.username) {
            return Err(StoreError::Duplicate(UniqueField::Username));
        }
        if t.owners.iter().any(|o| o.user.email == new.email) {
            return Err(StoreError::Duplicate(UniqueField::Email));
        }
        let owner = Owner {
            user: UserFields {
                user_id: Uuid::new_v4(),
                username: new.username,
                password_hash: new.password_hash,
                email: new.email,
            },
            created_at: OffsetDateTime::now_utc(),
        };
        t.owners.push(owner.clone());
        Ok(owner)
    }

    async fn find_owner_by_id(&self, id: Uuid) -> Result<Option<Owner>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.owners.iter().find(|o| o.id() == id).cloned())
    }

    async fn find_owner_by_username(&self, username: &str) -> Result<Option<Owner>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.owners.iter().find(|o| o.user.username == username).cloned())
    }

    async fn find_owner_by_email(&self, email: &str) -> Result<Option<Owner>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.owners.iter().find(|o| o.user.email == email).cloned())
    }

    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError> {
        Ok(self.tables.read().await.owners.clone())
    }

    async fn insert_listing(&self, new: NewListing) -> Result<Listing, StoreError> {
        let mut t = self.tables.write().await;
        if !t.owners.iter().any(|o| o.id() == new.owner_id) {
            return Err(StoreError::MissingReference);
        }
        let listing = Listing {
            listing_id: Uuid::new_v4(),
            owner_id: new.owner_id,
            title: new.title,
            description: new.description,
            location: new.location,
            price_per_night: new.price_per_night,
            max_guests: new.max_guests,
            created_at: OffsetDateTime::now_utc(),
        };
        t.listings.push(listing.clone());
        Ok(listing)
    }

    async fn find_listing_by_id(&self, id: Uuid) -> Result<Option<Listing>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.listings.iter().find(|l| l.listing_id == id).cloned())
    }

    async fn list_listings(&self) -> Result<Vec<Listing>, StoreError> {
        Ok(self.tables.read().await.listings.clone())
    }

    async fn list_listings_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.listings
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert_booking(&self, new: NewBooking) -> Result<Booking, StoreError> {
        let mut t = self.tables.write().await;
        if !t.listings.iter().any(|l| l.listing_id == new.listing_id) {
            return Err(StoreError::MissingReference);
        }
        let booking = Booking {
            booking_id: Uuid::new_v4(),
            listing_id: new.listing_id,
            renter_name: new.renter_name,
            start_date: new.start_date,
            end_date: new.end_date,
            created_at: OffsetDateTime::now_utc(),
        };
        t.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn list_bookings_by_listing(&self, listing_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        let t = self.tables.read().await;
        let mut rows: Vec<Booking> = t
            .bookings
            .iter()
            .filter(|b| b.listing_id == listing_id)
            .cloned()
            .collect();
        rows.sort_by_key(|b| (b.start_date, b.booking_id));
        Ok(rows)
    }

    async fn list_bookings_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        let t = self.tables.read().await;
        let owned: Vec<Uuid> = t
            .listings
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .map(|l| l.listing_id)
            .collect();
        let mut rows: Vec<Booking> = t
            .bookings
            .iter()
            .filter(|b| owned.contains(&b.listing_id))
            .cloned()
            .collect();
        rows.sort_by_key(|b| (b.start_date, b.booking_id));
        Ok(rows)
    }
}
