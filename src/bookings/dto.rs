use serde::Deserialize;
use time::Date;

/// Dates are `YYYY-MM-DD`; `endDate` is the checkout day.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub renter_name: String,
    pub start_date: Date,
    pub end_date: Date,
}
