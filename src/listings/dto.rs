use serde::Deserialize;

/// Body of both listing-creation routes. An `ownerId` in the body is ignored;
/// the owner always comes from the session or the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price_per_night: i64,
    #[serde(default = "default_max_guests")]
    pub max_guests: i32,
}

fn default_max_guests() -> i32 {
    1
}
