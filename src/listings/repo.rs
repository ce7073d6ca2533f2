use sqlx::PgPool;
use uuid::Uuid;

use crate::listings::repo_types::{Listing, NewListing};

pub async fn insert(db: &PgPool, new: &NewListing) -> Result<Listing, sqlx::Error> {
    sqlx::query_as::<_, Listing>(
        r#"
        INSERT INTO listings (listing_id, owner_id, title, description, location, price_per_night, max_guests)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING listing_id, owner_id, title, description, location, price_per_night, max_guests, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.owner_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.location)
    .bind(new.price_per_night)
    .bind(new.max_guests)
    .fetch_one(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Listing>, sqlx::Error> {
    sqlx::query_as::<_, Listing>(
        r#"
        SELECT listing_id, owner_id, title, description, location, price_per_night, max_guests, created_at
        FROM listings
        WHERE listing_id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn list_all(db: &PgPool) -> Result<Vec<Listing>, sqlx::Error> {
    sqlx::query_as::<_, Listing>(
        r#"
        SELECT listing_id, owner_id, title, description, location, price_per_night, max_guests, created_at
        FROM listings
        ORDER BY created_at, listing_id
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn list_by_owner(db: &PgPool, owner_id: Uuid) -> Result<Vec<Listing>, sqlx::Error> {
    sqlx::query_as::<_, Listing>(
        r#"
        SELECT listing_id, owner_id, title, description, location, price_per_night, max_guests, created_at
        FROM listings
        WHERE owner_id = $1
        ORDER BY created_at, listing_id
        "#,
    )
    .bind(owner_id)
    .fetch_all(db)
    .await
}
