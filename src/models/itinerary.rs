use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An activity embedded in an itinerary. Identified by a uuid assigned at
/// creation time, never by list position.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItineraryActivity {
    pub id: Uuid,
    pub country: String,
    pub city: String,
    pub description: String,
    #[serde(rename = "type")]
    pub activity_type: Option<String>, // cultural, adventure, ...
    pub cost: f64,
    pub date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Itinerary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: Option<ObjectId>,
    pub trip_name: String,
    pub description: Option<String>,
    pub countries: Vec<String>,
    pub cities: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub total_budget: f64,
    pub remaining_budget: f64,
    pub activities: Vec<ItineraryActivity>,
    pub transport: Vec<String>,
    pub status: String, // "planning" on create
    pub priority: Option<String>,
    pub favorite: bool,
    pub generated_by_ai: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ItineraryInput {
    pub trip_name: String,
    pub description: Option<String>,
    pub countries: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_budget: Option<f64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub favorite: Option<bool>,
}

/// Fields written back on edit. Serialized into the `$set` document, so
/// everything here overwrites the stored itinerary.
#[derive(Debug, Serialize)]
pub struct ItineraryUpdate {
    pub trip_name: String,
    pub description: Option<String>,
    pub countries: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub total_budget: f64,
    pub remaining_budget: f64,
    pub status: String,
    pub priority: Option<String>,
    pub favorite: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateItineraryInput {
    pub trip_type: String, // cultural, adventure, relax, gastronomy, shopping
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub duration_days: i64,
    pub budget: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityInput {
    pub country: String,
    pub city: String,
    pub description: String,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub cost: Option<f64>,
    pub date: Option<NaiveDate>,
}

/// Itinerary plus the metrics derived on every read.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    pub percent_complete: u32,
    pub percent_budget_used: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_trip: Option<i64>,
}
