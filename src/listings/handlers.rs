use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use tower_sessions::Session;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    extract::Json,
    listings::{dto::CreateListingRequest, repo_types::Listing, services},
    session::AuthSession,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(list_listings).post(create_listing))
}

#[instrument(skip(state))]
pub async fn list_listings(State(state): State<AppState>) -> Result<Json<Vec<Listing>>, AppError> {
    Ok(Json(services::get_all_listings(state.store.as_ref()).await?))
}

/// POST /listings: the owner is whoever holds the session.
#[instrument(skip(state, session, payload))]
pub async fn create_listing(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<Listing>), AppError> {
    let Some(owner) = AuthSession::new(&session).owner().await? else {
        warn!("create listing without session");
        return Err(AppError::InvalidAuthentication(
            "You must be logged in to create a listing".into(),
        ));
    };
    let listing = services::create_listing(state.store.as_ref(), owner.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// POST /owners/:id/listings: trusts the path id, no session required.
/// Mounted by the owners router, which owns that path.
#[instrument(skip(state, payload))]
pub async fn create_owner_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateListingRequest>,
) -> Result<Json<Listing>, AppError> {
    Ok(Json(
        services::create_listing_for_owner(state.store.as_ref(), id, payload).await?,
    ))
}
