use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::bookings::{self, repo_types::{Booking, NewBooking}};
use crate::listings::{self, repo_types::{Listing, NewListing}};
use crate::owners::{self, repo_types::{NewOwner, Owner}};

mod memory;

pub use memory::MemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate value for unique field {0:?}")]
    Duplicate(UniqueField),

    #[error("referenced row does not exist")]
    MissingReference,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence seam for owners, listings and bookings.
#[async_trait]
pub trait MarketStore: Send + Sync {
    async fn insert_owner(&self, new: NewOwner) -> Result<Owner, StoreError>;
    async fn find_owner_by_id(&self, id: Uuid) -> Result<Option<Owner>, StoreError>;
    async fn find_owner_by_username(&self, username: &str) -> Result<Option<Owner>, StoreError>;
    async fn find_owner_by_email(&self, email: &str) -> Result<Option<Owner>, StoreError>;
    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError>;

    async fn insert_listing(&self, new: NewListing) -> Result<Listing, StoreError>;
    async fn find_listing_by_id(&self, id: Uuid) -> Result<Option<Listing>, StoreError>;
    async fn list_listings(&self) -> Result<Vec<Listing>, StoreError>;
    async fn list_listings_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, StoreError>;

    async fn insert_booking(&self, new: NewBooking) -> Result<Booking, StoreError>;
    async fn list_bookings_by_listing(&self, listing_id: Uuid) -> Result<Vec<Booking>, StoreError>;
    async fn list_bookings_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, StoreError>;
}

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Turns constraint violations into the store's own variants.
fn map_db_err(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some(c) if c.contains("email") => StoreError::Duplicate(UniqueField::Email),
                _ => StoreError::Duplicate(UniqueField::Username),
            };
        }
        if db.is_foreign_key_violation() {
            return StoreError::MissingReference;
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl MarketStore for PgStore {
    async fn insert_owner(&self, new: NewOwner) -> Result<Owner, StoreError> {
        owners::repo::insert(&self.db, &new).await.map_err(map_db_err)
    }

    async fn find_owner_by_id(&self, id: Uuid) -> Result<Option<Owner>, StoreError> {
        Ok(owners::repo::find_by_id(&self.db, id).await?)
    }

    async fn find_owner_by_username(&self, username: &str) -> Result<Option<Owner>, StoreError> {
        Ok(owners::repo::find_by_username(&self.db, username).await?)
    }

    async fn find_owner_by_email(&self, email: &str) -> Result<Option<Owner>, StoreError> {
        Ok(owners::repo::find_by_email(&self.db, email).await?)
    }

    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError> {
        Ok(owners::repo::list_all(&self.db).await?)
    }

    async fn insert_listing(&self, new: NewListing) -> Result<Listing, StoreError> {
        listings::repo::insert(&self.db, &new).await.map_err(map_db_err)
    }

    async fn find_listing_by_id(&self, id: Uuid) -> Result<Option<Listing>, StoreError> {
        Ok(listings::repo::find_by_id(&self.db, id).await?)
    }

    async fn list_listings(&self) -> Result<Vec<Listing>, StoreError> {
        Ok(listings::repo::list_all(&self.db).await?)
    }

    async fn list_listings_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, StoreError> {
        Ok(listings::repo::list_by_owner(&self.db, owner_id).await?)
    }

    async fn insert_booking(&self, new: NewBooking) -> Result<Booking, StoreError> {
        bookings::repo::insert(&self.db, &new).await.map_err(map_db_err)
    }

    async fn list_bookings_by_listing(&self, listing_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        Ok(bookings::repo::list_by_listing(&self.db, listing_id).await?)
    }

    async fn list_bookings_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        Ok(bookings::repo::list_by_owner(&self.db, owner_id).await?)
    }
}
