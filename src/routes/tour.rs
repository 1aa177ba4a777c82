use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::models::tour::{find_tour, Tour, TOURS};
use crate::services::quote_service::{QuoteError, QuoteService, ServiceTier};

fn default_travelers() -> u32 {
    1
}

fn default_nights() -> u32 {
    7
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub tour: String,
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    #[serde(default = "default_nights")]
    pub nights: u32,
    #[serde(default)]
    pub tier: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub tour: &'static Tour,
    pub travelers: u32,
    pub nights: u32,
    pub tier: &'static str,
    pub final_price: f64,
}

/*
    GET /api/tours
*/
pub async fn get_catalog() -> impl Responder {
    HttpResponse::Ok().json(TOURS)
}

/*
    GET /api/tours/{key}
*/
pub async fn get_tour(path: web::Path<String>) -> impl Responder {
    match find_tour(path.into_inner().as_str()) {
        Some(tour) => HttpResponse::Ok().json(tour),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Tour not found" })),
    }
}

/*
    POST /api/tours/quote
*/
pub async fn quote(input: web::Json<QuoteRequest>) -> impl Responder {
    let input = input.into_inner();
    let tier = ServiceTier::parse(input.tier.as_deref().unwrap_or("estandar"));

    match QuoteService::quote(&input.tour, tier, input.travelers, input.nights) {
        Ok((tour, final_price)) => HttpResponse::Ok().json(QuoteResponse {
            tour,
            travelers: input.travelers,
            nights: input.nights,
            tier: tier.as_str(),
            final_price,
        }),
        Err(QuoteError::TourNotFound) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Tour not found" }))
        }
        Err(QuoteError::InvalidTravelers) => HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Traveler count must be positive" })),
        Err(QuoteError::InvalidNights) => HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Night count must be positive" })),
    }
}
