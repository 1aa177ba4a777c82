use actix_web::HttpResponse;
use bson::Bson;
use chrono::{DateTime, Utc};

pub mod account;
pub mod destination;
pub mod health;
pub mod itinerary;
pub mod tour;

/// Write rejected because the store is running without a database.
pub(crate) fn demo_mode_response() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(serde_json::json!({
        "error": "Demo mode: database unavailable, changes are not saved"
    }))
}

/// Timestamps in update documents must round-trip through the same serde
/// representation the models use.
pub(crate) fn bson_datetime(value: &DateTime<Utc>) -> Bson {
    bson::to_bson(value).unwrap_or(Bson::Null)
}
