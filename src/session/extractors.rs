use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use super::{AuthSession, SessionOwner};
use crate::error::AppError;

/// Requires a logged-in owner.
pub struct AuthOwner(pub SessionOwner);

#[async_trait]
impl<S> FromRequestParts<S> for AuthOwner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(anyhow::anyhow!(msg)))?;
        AuthSession::new(&session)
            .owner()
            .await?
            .map(AuthOwner)
            .ok_or_else(|| AppError::InvalidAuthentication("You must be logged in".into()))
    }
}
