use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_sessions::Session;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::AppError,
    extract::Json,
    listings::{self, repo_types::Listing},
    owners::{
        dto::{AccountDetails, LoginRequest, OwnerView, RegisterRequest},
        services,
    },
    session::{extractors::AuthOwner, AuthSession},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/owners/register", post(register))
        .route("/owners/login", post(login))
        .route("/owners/logout", post(logout))
        .route("/owners/me", get(get_me))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/owners", get(list_owners))
        .route("/owners/:id", get(account_details))
        .route(
            "/owners/:id/listings",
            get(owner_listings).post(listings::handlers::create_owner_listing),
        )
}

#[instrument(skip(state, session, payload))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<OwnerView>), AppError> {
    let owner = services::register_owner(
        state.store.as_ref(),
        &payload.username,
        &payload.password,
        &payload.email,
    )
    .await?;

    AuthSession::new(&session).start(&owner).await?;
    Ok((StatusCode::CREATED, Json(OwnerView::new(owner, Vec::new()))))
}

#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<OwnerView>, AppError> {
    let owner = services::login(state.store.as_ref(), &payload.username, &payload.password)
        .await
        .map_err(|e| match e {
            // same answer for unknown usernames and wrong passwords
            AppError::UserNotFound(_) => {
                AppError::InvalidAuthentication(services::INVALID_CREDENTIALS.into())
            }
            other => other,
        })?;

    AuthSession::new(&session).start(&owner).await?;
    Ok(Json(services::get_owner_view(state.store.as_ref(), owner).await?))
}

#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    let auth = AuthSession::new(&session);
    if let Some(owner) = auth.owner().await? {
        info!(user_id = %owner.user_id, "owner logged out");
    }
    auth.end().await?;
    Ok(StatusCode::OK)
}

#[instrument(skip(state, owner))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthOwner(owner): AuthOwner,
) -> Result<Json<OwnerView>, AppError> {
    let owner = services::get_owner_by_id(state.store.as_ref(), owner.user_id).await?;
    Ok(Json(services::get_owner_view(state.store.as_ref(), owner).await?))
}

#[instrument(skip(state))]
pub async fn list_owners(State(state): State<AppState>) -> Result<Json<Vec<OwnerView>>, AppError> {
    Ok(Json(services::get_all_owners(state.store.as_ref()).await?))
}

#[instrument(skip(state))]
pub async fn account_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountDetails>, AppError> {
    Ok(Json(services::get_account_details(state.store.as_ref(), id).await?))
}

#[instrument(skip(state))]
pub async fn owner_listings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Listing>>, AppError> {
    Ok(Json(services::get_owner_listings(state.store.as_ref(), id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_view_never_serializes_password_hash() {
        use crate::owners::repo_types::{Owner, UserFields};

        let owner = Owner {
            user: UserFields {
                user_id: Uuid::new_v4(),
                username: "alice".into(),
                password_hash: "$argon2id$secret".into(),
                email: "alice@example.com".into(),
            },
            created_at: time::OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(OwnerView::new(owner, Vec::new())).unwrap();
        assert_eq!(json["username"], "alice");
        assert!(json.get("userId").is_some());
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }
}
