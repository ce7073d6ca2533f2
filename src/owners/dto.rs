use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listings::repo_types::Listing;
use crate::owners::repo_types::Owner;

/// Request body for owner registration. Missing fields arrive empty and fail validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Owner as exposed over HTTP: identity plus its listings, never the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerView {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub listings: Vec<Listing>,
}

impl OwnerView {
    pub fn new(owner: Owner, listings: Vec<Listing>) -> Self {
        Self {
            user_id: owner.user.user_id,
            username: owner.user.username,
            email: owner.user.email,
            listings,
        }
    }
}

/// `GET /owners/{id}` projection.
#[derive(Debug, Serialize)]
pub struct AccountDetails {
    pub username: String,
    pub email: String,
    pub listings: Vec<Listing>,
}
