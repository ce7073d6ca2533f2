//! Typed access to the owner stored in the request's session.
//!
//! Sessions themselves are managed by `tower-sessions`: an in-memory store
//! keyed by an opaque cookie id, expiring after a period of inactivity. This
//! module only decides what lives in a session and under which key.

use serde::{Deserialize, Serialize};
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, Session, SessionManagerLayer};
use uuid::Uuid;

use crate::{config::SessionConfig, error::AppError, owners::repo_types::Owner};

pub(crate) mod extractors;

const SESSION_AUTH_OWNER: &str = "auth:owner";

/// What a session remembers about its owner. No credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOwner {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&Owner> for SessionOwner {
    fn from(owner: &Owner) -> Self {
        Self {
            user_id: owner.user.user_id,
            username: owner.user.username.clone(),
            email: owner.user.email.clone(),
        }
    }
}

/// Session layer for the whole router.
pub fn session_layer(cfg: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(cfg.cookie_name.clone())
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(cfg.cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(cfg.ttl_minutes)))
}

/// Authentication state of one session.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Logs `owner` in under a fresh session id, so an id the client held
    /// before authenticating is never promoted.
    pub async fn start(&self, owner: &Owner) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session
            .insert(SESSION_AUTH_OWNER, SessionOwner::from(owner))
            .await?;
        Ok(())
    }

    pub async fn owner(&self) -> Result<Option<SessionOwner>, AppError> {
        Ok(self.session.get::<SessionOwner>(SESSION_AUTH_OWNER).await?)
    }

    /// Deletes the session and its data; the layer expires the cookie.
    pub async fn end(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}
