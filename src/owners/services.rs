use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    listings::repo_types::Listing,
    owners::{
        dto::{AccountDetails, OwnerView},
        password::{hash_password, verify_password},
        repo_types::{NewOwner, Owner},
    },
    store::{MarketStore, StoreError, UniqueField},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) const INVALID_CREDENTIALS: &str = "Invalid credentials";

fn username_taken(username: &str) -> AppError {
    AppError::UsernameAlreadyTaken(format!("Username {username} is already taken"))
}

fn email_taken() -> AppError {
    AppError::InvalidRegistration("Email already registered".into())
}

pub async fn register_owner(
    store: &dyn MarketStore,
    username: &str,
    password: &str,
    email: &str,
) -> Result<Owner, AppError> {
    let username = username.trim();
    let email = email.trim().to_lowercase();

    if username.is_empty() {
        return Err(AppError::InvalidRegistration("Username is required".into()));
    }
    if password.is_empty() {
        return Err(AppError::InvalidRegistration("Password is required".into()));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::InvalidRegistration("Invalid email".into()));
    }

    if store.find_owner_by_username(username).await?.is_some() {
        warn!(username, "username already registered");
        return Err(username_taken(username));
    }
    if store.find_owner_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(email_taken());
    }

    let password_hash = hash_password(password)?;
    let owner = store
        .insert_owner(NewOwner {
            username: username.to_string(),
            password_hash,
            email,
        })
        .await
        .map_err(|e| match e {
            StoreError::Duplicate(UniqueField::Username) => username_taken(username),
            StoreError::Duplicate(UniqueField::Email) => email_taken(),
            other => other.into(),
        })?;

    info!(user_id = %owner.id(), username = %owner.user.username, "owner registered");
    Ok(owner)
}

pub async fn login(
    store: &dyn MarketStore,
    username: &str,
    password: &str,
) -> Result<Owner, AppError> {
    let username = username.trim();
    let owner = store
        .find_owner_by_username(username)
        .await?
        .ok_or_else(|| {
            warn!(username, "login unknown username");
            AppError::UserNotFound(format!("No owner named {username}"))
        })?;

    if !verify_password(password, &owner.user.password_hash)? {
        warn!(user_id = %owner.id(), "login invalid password");
        return Err(AppError::InvalidAuthentication(INVALID_CREDENTIALS.into()));
    }

    info!(user_id = %owner.id(), "owner logged in");
    Ok(owner)
}

pub async fn get_owner_by_id(store: &dyn MarketStore, id: Uuid) -> Result<Owner, AppError> {
    store
        .find_owner_by_id(id)
        .await?
        .ok_or_else(|| AppError::UserNotFound(format!("Owner {id} not found")))
}

pub async fn get_owner_view(store: &dyn MarketStore, owner: Owner) -> Result<OwnerView, AppError> {
    let listings = store.list_listings_by_owner(owner.id()).await?;
    Ok(OwnerView::new(owner, listings))
}

/// Every owner with its listings, in two queries.
pub async fn get_all_owners(store: &dyn MarketStore) -> Result<Vec<OwnerView>, AppError> {
    let owners = store.list_owners().await?;
    let mut by_owner: HashMap<Uuid, Vec<Listing>> = HashMap::new();
    for listing in store.list_listings().await? {
        by_owner.entry(listing.owner_id).or_default().push(listing);
    }
    Ok(owners
        .into_iter()
        .map(|o| {
            let listings = by_owner.remove(&o.id()).unwrap_or_default();
            OwnerView::new(o, listings)
        })
        .collect())
}

pub async fn get_account_details(
    store: &dyn MarketStore,
    id: Uuid,
) -> Result<AccountDetails, AppError> {
    let owner = get_owner_by_id(store, id).await?;
    let listings = store.list_listings_by_owner(id).await?;
    Ok(AccountDetails {
        username: owner.user.username,
        email: owner.user.email,
        listings,
    })
}

pub async fn get_owner_listings(
    store: &dyn MarketStore,
    owner_id: Uuid,
) -> Result<Vec<Listing>, AppError> {
    Ok(store.list_listings_by_owner(owner_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn register_returns_owner_with_hashed_password() {
        let store = MemoryStore::new();
        let owner = register_owner(&store, " alice ", "pw", "Alice@Example.com")
            .await
            .unwrap();
        assert_eq!(owner.user.username, "alice");
        assert_eq!(owner.user.email, "alice@example.com");
        assert_ne!(owner.user.password_hash, "pw");
    }

    #[tokio::test]
    async fn second_registration_with_same_username_fails() {
        let store = MemoryStore::new();
        register_owner(&store, "alice", "pw", "a@example.com").await.unwrap();
        let err = register_owner(&store, "alice", "pw2", "b@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UsernameAlreadyTaken(_)));
    }

    #[tokio::test]
    async fn second_registration_with_same_email_fails() {
        let store = MemoryStore::new();
        register_owner(&store, "alice", "pw", "a@example.com").await.unwrap();
        let err = register_owner(&store, "bob", "pw", "A@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRegistration(_)));
    }

    #[tokio::test]
    async fn registration_requires_fields() {
        let store = MemoryStore::new();
        for (u, p, e) in [("", "pw", "a@example.com"), ("a", "", "a@example.com"), ("a", "pw", "nope")] {
            let err = register_owner(&store, u, p, e).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidRegistration(_)), "{u:?} {p:?} {e:?}");
        }
        assert!(store.list_owners().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_checks_username_then_password() {
        let store = MemoryStore::new();
        let registered = register_owner(&store, "alice", "pw", "a@example.com").await.unwrap();

        let err = login(&store, "nobody", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));

        let err = login(&store, "alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidAuthentication(_)));

        let owner = login(&store, "alice", "pw").await.unwrap();
        assert_eq!(owner.id(), registered.id());
    }

    #[tokio::test]
    async fn unknown_owner_id_is_not_found() {
        let store = MemoryStore::new();
        let err = get_account_details(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
        assert!(get_owner_listings(&store, Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn all_owners_carry_their_own_listings() {
        use crate::listings::repo_types::NewListing;

        let store = MemoryStore::new();
        let alice = register_owner(&store, "alice", "pw", "a@example.com").await.unwrap();
        let bob = register_owner(&store, "bob", "pw", "b@example.com").await.unwrap();
        store
            .insert_listing(NewListing {
                owner_id: bob.id(),
                title: "Loft".into(),
                description: String::new(),
                location: "Oslo".into(),
                price_per_night: 9000,
                max_guests: 2,
            })
            .await
            .unwrap();

        let views = get_all_owners(&store).await.unwrap();
        assert_eq!(views.len(), 2);
        let a = views.iter().find(|v| v.user_id == alice.id()).unwrap();
        let b = views.iter().find(|v| v.user_id == bob.id()).unwrap();
        assert!(a.listings.is_empty());
        assert_eq!(b.listings.len(), 1);
        assert_eq!(b.listings[0].title, "Loft");
    }
}
