use sqlx::PgPool;
use uuid::Uuid;

use crate::owners::repo_types::{NewOwner, Owner};

/// Insert a new owner with a pre-hashed password.
pub async fn insert(db: &PgPool, new: &NewOwner) -> Result<Owner, sqlx::Error> {
    sqlx::query_as::<_, Owner>(
        r#"
        INSERT INTO owners (user_id, username, password_hash, email)
        VALUES ($1, $2, $3, $4)
        RETURNING user_id, username, password_hash, email, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.username)
    .bind(&new.password_hash)
    .bind(&new.email)
    .fetch_one(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Owner>, sqlx::Error> {
    sqlx::query_as::<_, Owner>(
        r#"
        SELECT user_id, username, password_hash, email, created_at
        FROM owners
        WHERE user_id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<Owner>, sqlx::Error> {
    sqlx::query_as::<_, Owner>(
        r#"
        SELECT user_id, username, password_hash, email, created_at
        FROM owners
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<Owner>, sqlx::Error> {
    sqlx::query_as::<_, Owner>(
        r#"
        SELECT user_id, username, password_hash, email, created_at
        FROM owners
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn list_all(db: &PgPool) -> Result<Vec<Owner>, sqlx::Error> {
    sqlx::query_as::<_, Owner>(
        r#"
        SELECT user_id, username, password_hash, email, created_at
        FROM owners
        ORDER BY created_at, user_id
        "#,
    )
    .fetch_all(db)
    .await
}
