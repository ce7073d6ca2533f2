//! Error type shared by services and handlers.
//!
//! Services return `AppError` for business-rule violations; handlers let it
//! bubble up and `IntoResponse` turns it into a status code with the message
//! as a plain-text body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing session or credentials that do not verify.
    #[error("{0}")]
    InvalidAuthentication(String),

    /// Registration payload rejected (empty fields, bad email, email in use).
    #[error("{0}")]
    InvalidRegistration(String),

    #[error("{0}")]
    UsernameAlreadyTaken(String),

    #[error("{0}")]
    UserNotFound(String),

    #[error("{0}")]
    InvalidListing(String),

    #[error("{0}")]
    ListingNotFound(String),

    #[error("{0}")]
    InvalidBooking(String),

    /// Body that is not the JSON a route expects.
    #[error("{0}")]
    MalformedRequest(String),

    /// Persistence failure. Logged; the client only sees a generic message.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Session store failure.
    #[error(transparent)]
    Session(#[from] tower_sessions::session::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidAuthentication(_)
            | Self::InvalidRegistration(_)
            | Self::UsernameAlreadyTaken(_)
            | Self::InvalidListing(_)
            | Self::InvalidBooking(_)
            | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound(_) | Self::ListingNotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
            return (status, "Internal server error".to_string()).into_response();
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_map_to_client_statuses() {
        let cases = [
            (AppError::InvalidAuthentication("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidRegistration("x".into()), StatusCode::BAD_REQUEST),
            (AppError::UsernameAlreadyTaken("x".into()), StatusCode::BAD_REQUEST),
            (AppError::UserNotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::ListingNotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::InvalidBooking("x".into()), StatusCode::BAD_REQUEST),
            (AppError::MalformedRequest("x".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::Internal(anyhow::anyhow!("connection refused on 10.0.0.3"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn message_is_the_display_text() {
        let err = AppError::UsernameAlreadyTaken("Username alice is already taken".into());
        assert_eq!(err.to_string(), "Username alice is already taken");
    }
}
