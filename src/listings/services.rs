use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    listings::{
        dto::CreateListingRequest,
        repo_types::{Listing, NewListing},
    },
    store::{MarketStore, StoreError},
};

fn validate(req: &CreateListingRequest) -> Result<(), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::InvalidListing("Title is required".into()));
    }
    if req.price_per_night < 0 {
        return Err(AppError::InvalidListing("Price per night cannot be negative".into()));
    }
    if req.max_guests < 1 {
        return Err(AppError::InvalidListing("A listing must host at least one guest".into()));
    }
    Ok(())
}

/// Persists a listing owned by `owner_id`.
pub async fn create_listing(
    store: &dyn MarketStore,
    owner_id: Uuid,
    req: CreateListingRequest,
) -> Result<Listing, AppError> {
    validate(&req)?;
    let listing = store
        .insert_listing(NewListing {
            owner_id,
            title: req.title.trim().to_string(),
            description: req.description,
            location: req.location,
            price_per_night: req.price_per_night,
            max_guests: req.max_guests,
        })
        .await
        .map_err(|e| match e {
            StoreError::MissingReference => {
                AppError::UserNotFound(format!("Owner {owner_id} not found"))
            }
            other => other.into(),
        })?;

    info!(listing_id = %listing.listing_id, owner_id = %owner_id, "listing created");
    Ok(listing)
}

/// Owner-scoped creation: the owner id comes from the path and only has to exist.
pub async fn create_listing_for_owner(
    store: &dyn MarketStore,
    owner_id: Uuid,
    req: CreateListingRequest,
) -> Result<Listing, AppError> {
    if store.find_owner_by_id(owner_id).await?.is_none() {
        return Err(AppError::UserNotFound(format!("Owner {owner_id} not found")));
    }
    create_listing(store, owner_id, req).await
}

pub async fn get_all_listings(store: &dyn MarketStore) -> Result<Vec<Listing>, AppError> {
    Ok(store.list_listings().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owners::repo_types::NewOwner;
    use crate::store::MemoryStore;

    fn cabin() -> CreateListingRequest {
        CreateListingRequest {
            title: "Cabin".into(),
            description: "By the lake".into(),
            location: "Lillehammer".into(),
            price_per_night: 12000,
            max_guests: 4,
        }
    }

    async fn owner(store: &MemoryStore) -> Uuid {
        store
            .insert_owner(NewOwner {
                username: "alice".into(),
                password_hash: "hash".into(),
                email: "a@example.com".into(),
            })
            .await
            .unwrap()
            .id()
    }

    #[tokio::test]
    async fn created_listing_belongs_to_owner() {
        let store = MemoryStore::new();
        let owner_id = owner(&store).await;
        let listing = create_listing(&store, owner_id, cabin()).await.unwrap();
        assert_eq!(listing.owner_id, owner_id);
        assert_eq!(get_all_listings(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_invalid_listings() {
        let store = MemoryStore::new();
        let owner_id = owner(&store).await;

        let mut req = cabin();
        req.title = "  ".into();
        assert!(matches!(
            create_listing(&store, owner_id, req).await.unwrap_err(),
            AppError::InvalidListing(_)
        ));

        let mut req = cabin();
        req.price_per_night = -1;
        assert!(create_listing(&store, owner_id, req).await.is_err());

        let mut req = cabin();
        req.max_guests = 0;
        assert!(create_listing(&store, owner_id, req).await.is_err());

        assert!(get_all_listings(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn owner_scoped_creation_requires_existing_owner() {
        let store = MemoryStore::new();
        let err = create_listing_for_owner(&store, Uuid::new_v4(), cabin())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));

        let owner_id = owner(&store).await;
        let listing = create_listing_for_owner(&store, owner_id, cabin()).await.unwrap();
        assert_eq!(listing.owner_id, owner_id);
    }
}
