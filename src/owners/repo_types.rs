use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Identity fields shared by every account kind.
#[derive(Debug, Clone, FromRow)]
pub struct UserFields {
    pub user_id: Uuid,
    pub username: String,
    pub password_hash: String, // argon2 PHC string, never serialized
    pub email: String,
}

/// Owner record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Owner {
    #[sqlx(flatten)]
    pub user: UserFields,
    pub created_at: OffsetDateTime,
}

impl Owner {
    pub fn id(&self) -> Uuid {
        self.user.user_id
    }
}

/// Insert payload; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewOwner {
    pub username: String,
    pub password_hash: String,
    pub email: String,
}
