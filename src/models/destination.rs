use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Destination {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub country: String,
    pub city: Option<String>,
    pub best_season: Option<String>,
    pub budget: Option<f64>,
    pub activities: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Form payload for create/update. Required fields are validated after
/// trimming; the rest fall back to defaults.
#[derive(Debug, Deserialize, Serialize)]
pub struct DestinationInput {
    pub name: String,
    pub country: String,
    pub description: String,
    pub city: Option<String>,
    pub best_season: Option<String>,
    pub budget: Option<f64>,
    pub activities: Option<String>,
    pub image: Option<String>,
    pub rating: Option<i32>,
}
