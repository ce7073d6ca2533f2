use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    bookings::{dto::BookingRequest, repo_types::Booking, services},
    error::AppError,
    extract::Json,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/listings/:id/bookings", post(request_booking))
        .route("/owners/:id/bookings", get(owner_bookings))
}

#[instrument(skip(state, payload))]
pub async fn request_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = services::request_booking(state.store.as_ref(), id, payload).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[instrument(skip(state))]
pub async fn owner_bookings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(services::get_bookings_by_owner_id(state.store.as_ref(), id).await?))
}
