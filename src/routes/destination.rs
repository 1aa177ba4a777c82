use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use bson::{doc, oid::ObjectId};

use crate::db::mongo::Store;
use crate::models::destination::{Destination, DestinationInput};
use crate::routes::demo_mode_response;

// Season default is a wire-contract string like the service tier keys
const DEFAULT_SEASON: &str = "Todo el año";
const DEFAULT_RATING: i32 = 3;

/// Required fields after trimming, or an error message for the client.
fn validate(input: &DestinationInput) -> Result<(String, String, String), &'static str> {
    let name = input.name.trim();
    let country = input.country.trim();
    let description = input.description.trim();

    if name.is_empty() || country.is_empty() || description.is_empty() {
        return Err("Name, country and description are required");
    }
    Ok((
        name.to_string(),
        country.to_string(),
        description.to_string(),
    ))
}

fn from_input(input: DestinationInput) -> Result<Destination, &'static str> {
    let (name, country, description) = validate(&input)?;
    Ok(Destination {
        id: None,
        name,
        country,
        city: Some(input.city.unwrap_or_default().trim().to_string()),
        best_season: Some(
            input
                .best_season
                .unwrap_or_else(|| DEFAULT_SEASON.to_string()),
        ),
        budget: Some(input.budget.unwrap_or(0.0)),
        activities: Some(input.activities.unwrap_or_default().trim().to_string()),
        description,
        image: Some(input.image.unwrap_or_default().trim().to_string()),
        rating: Some(input.rating.unwrap_or(DEFAULT_RATING).clamp(1, 5)),
        created_at: None,
        updated_at: None,
    })
}

/*
    GET /api/destinations
*/
pub async fn get_all(data: web::Data<Store>) -> impl Responder {
    let collection = match data.destinations() {
        Ok(collection) => collection,
        // Demo mode: the homepage still renders, just with no stored records
        Err(_) => return HttpResponse::Ok().json(Vec::<Destination>::new()),
    };

    match collection.find(doc! {}).sort(doc! { "name": 1 }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Destination>>().await {
            Ok(destinations) => HttpResponse::Ok().json(destinations),
            Err(err) => {
                log::error!("Failed to collect destinations: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to load destinations")
            }
        },
        Err(err) => {
            log::error!("Failed to query destinations: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to load destinations")
        }
    }
}

/*
    GET /api/destinations/{id}
*/
pub async fn get_by_id(data: web::Data<Store>, path: web::Path<String>) -> impl Responder {
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let collection = match data.destinations() {
        Ok(collection) => collection,
        Err(_) => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Destination not found" }))
        }
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(destination)) => HttpResponse::Ok().json(destination),
        Ok(None) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Destination not found" }))
        }
        Err(err) => {
            log::error!("Failed to retrieve destination: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve destination")
        }
    }
}

/*
    POST /api/destinations
*/
pub async fn create(data: web::Data<Store>, input: web::Json<DestinationInput>) -> impl Responder {
    let mut destination = match from_input(input.into_inner()) {
        Ok(destination) => destination,
        Err(message) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
        }
    };

    let collection = match data.destinations() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    let now = Utc::now();
    destination.created_at = Some(now);
    destination.updated_at = Some(now);

    match collection.insert_one(&destination).await {
        Ok(result) => HttpResponse::Created().json(serde_json::json!({
            "_id": result.inserted_id,
            "message": "Destination added"
        })),
        Err(err) => {
            log::error!("Failed to insert destination: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to save destination")
        }
    }
}

/*
    PUT /api/destinations/{id}

    Destination records carry no owner; any signed-in user may edit any
    record.
*/
pub async fn update(
    data: web::Data<Store>,
    path: web::Path<String>,
    input: web::Json<DestinationInput>,
) -> impl Responder {
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let mut destination = match from_input(input.into_inner()) {
        Ok(destination) => destination,
        Err(message) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
        }
    };
    destination.updated_at = Some(Utc::now());

    let collection = match data.destinations() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    let updates = match bson::to_document(&destination) {
        Ok(document) => document,
        Err(err) => {
            log::error!("Failed to serialize destination update: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to update destination");
        }
    };

    match collection
        .update_one(doc! { "_id": id }, doc! { "$set": updates })
        .await
    {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Destination not found" }))
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "message": "Destination updated" })),
        Err(err) => {
            log::error!("Failed to update destination: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update destination")
        }
    }
}

/*
    DELETE /api/destinations/{id}
*/
pub async fn delete(data: web::Data<Store>, path: web::Path<String>) -> impl Responder {
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let collection = match data.destinations() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    match collection.delete_one(doc! { "_id": id }).await {
        Ok(result) if result.deleted_count == 0 => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Destination not found" }))
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "message": "Destination deleted" })),
        Err(err) => {
            log::error!("Failed to delete destination: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete destination")
        }
    }
}
