use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use bson::{doc, oid::ObjectId, Bson, Document};
use uuid::Uuid;

use crate::db::mongo::Store;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::itinerary::{
    ActivityInput, GenerateItineraryInput, Itinerary, ItineraryActivity, ItineraryInput,
    ItineraryResponse, ItineraryUpdate,
};
use crate::routes::{bson_datetime, demo_mode_response};
use crate::services::itinerary_service::ItineraryPlanner;

fn owner_id(user: &AuthenticatedUser) -> Result<ObjectId, HttpResponse> {
    ObjectId::parse_str(&user.user_id)
        .map_err(|_| HttpResponse::BadRequest().body("Invalid user ID"))
}

fn parse_itinerary_id(raw: &str) -> Result<ObjectId, HttpResponse> {
    ObjectId::parse_str(raw).map_err(|_| HttpResponse::BadRequest().body("Invalid ID"))
}

fn not_found() -> HttpResponse {
    // Ownership mismatches look identical to missing documents on purpose
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Itinerary not found" }))
}

fn with_metrics(itinerary: Itinerary) -> ItineraryResponse {
    let today = Utc::now().date_naive();
    let percent_complete = ItineraryPlanner::percent_complete(&itinerary.activities);
    let percent_budget_used =
        ItineraryPlanner::percent_budget_used(itinerary.total_budget, itinerary.remaining_budget);
    let days_until_trip = ItineraryPlanner::days_until_trip(itinerary.start_date, today);

    ItineraryResponse {
        itinerary,
        percent_complete,
        percent_budget_used,
        days_until_trip,
    }
}

/// Shared validation for create and edit.
fn validated_fields(input: &ItineraryInput) -> Result<(String, Vec<String>, i64), HttpResponse> {
    let trip_name = input.trip_name.trim();
    if trip_name.is_empty() {
        return Err(
            HttpResponse::BadRequest().json(serde_json::json!({ "error": "Trip name is required" }))
        );
    }

    let countries: Vec<String> = input
        .countries
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if countries.is_empty() {
        return Err(HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "At least one country is required" })));
    }

    let duration_days = match ItineraryPlanner::duration_days(input.start_date, input.end_date) {
        Some(days) => days,
        None => {
            return Err(HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "End date must be after start date" })))
        }
    };

    Ok((trip_name.to_string(), countries, duration_days))
}

/// Update document adding an activity: the push and the budget decrement
/// travel in the same write.
fn activity_push_update(activity: Bson, cost: f64) -> Document {
    doc! {
        "$push": { "activities": activity },
        "$inc": { "remaining_budget": -cost },
        "$set": { "updated_at": bson_datetime(&Utc::now()) },
    }
}

/// Update document removing an activity, restoring exactly the stored cost.
fn activity_pull_update(activity_id: Uuid, cost: f64) -> Document {
    doc! {
        "$pull": { "activities": { "id": activity_id.to_string() } },
        "$inc": { "remaining_budget": cost },
        "$set": { "updated_at": bson_datetime(&Utc::now()) },
    }
}

/// New completion state for the addressed activity, or None when no stored
/// activity carries that id.
fn toggle_target(activities: &[ItineraryActivity], activity_id: Uuid) -> Option<bool> {
    activities
        .iter()
        .find(|a| a.id == activity_id)
        .map(|a| !a.completed)
}

/*
    GET /api/itineraries
*/
pub async fn get_own(user: AuthenticatedUser, data: web::Data<Store>) -> impl Responder {
    let owner = match owner_id(&user) {
        Ok(owner) => owner,
        Err(resp) => return resp,
    };

    let collection = match data.itineraries() {
        Ok(collection) => collection,
        Err(_) => return HttpResponse::Ok().json(Vec::<ItineraryResponse>::new()),
    };

    match collection
        .find(doc! { "user_id": owner })
        .sort(doc! { "created_at": -1 })
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<Itinerary>>().await {
            Ok(itineraries) => {
                let responses: Vec<ItineraryResponse> =
                    itineraries.into_iter().map(with_metrics).collect();
                HttpResponse::Ok().json(responses)
            }
            Err(err) => {
                log::error!("Failed to collect itineraries: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to load itineraries")
            }
        },
        Err(err) => {
            log::error!("Failed to query itineraries: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to load itineraries")
        }
    }
}

/*
    GET /api/itineraries/{id}
*/
pub async fn get_by_id(
    user: AuthenticatedUser,
    data: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let owner = match owner_id(&user) {
        Ok(owner) => owner,
        Err(resp) => return resp,
    };
    let id = match parse_itinerary_id(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let collection = match data.itineraries() {
        Ok(collection) => collection,
        Err(_) => return not_found(),
    };

    match collection
        .find_one(doc! { "_id": id, "user_id": owner })
        .await
    {
        Ok(Some(itinerary)) => HttpResponse::Ok().json(with_metrics(itinerary)),
        Ok(None) => not_found(),
        Err(err) => {
            log::error!("Failed to retrieve itinerary: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve itinerary")
        }
    }
}

/*
    POST /api/itineraries
*/
pub async fn create(
    user: AuthenticatedUser,
    data: web::Data<Store>,
    input: web::Json<ItineraryInput>,
) -> impl Responder {
    let owner = match owner_id(&user) {
        Ok(owner) => owner,
        Err(resp) => return resp,
    };

    let input = input.into_inner();
    let (trip_name, countries, duration_days) = match validated_fields(&input) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };

    let collection = match data.itineraries() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    let total_budget = input.total_budget.unwrap_or(0.0);
    let now = Utc::now();

    let itinerary = Itinerary {
        id: None,
        user_id: Some(owner),
        trip_name,
        description: input.description,
        countries,
        cities: Vec::new(),
        start_date: input.start_date,
        end_date: input.end_date,
        duration_days,
        total_budget,
        remaining_budget: total_budget,
        activities: Vec::new(),
        transport: Vec::new(),
        status: "planning".to_string(),
        priority: input.priority,
        favorite: input.favorite.unwrap_or(false),
        generated_by_ai: false,
        created_at: Some(now),
        updated_at: Some(now),
    };

    match collection.insert_one(&itinerary).await {
        Ok(result) => HttpResponse::Created().json(serde_json::json!({
            "_id": result.inserted_id,
            "message": "Itinerary created"
        })),
        Err(err) => {
            log::error!("Failed to insert itinerary: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create itinerary")
        }
    }
}

/*
    PUT /api/itineraries/{id}

    Overwrites the editable fields and recomputes both duration and the
    remaining budget from the stored activity costs.
*/
pub async fn update(
    user: AuthenticatedUser,
    data: web::Data<Store>,
    path: web::Path<String>,
    input: web::Json<ItineraryInput>,
) -> impl Responder {
    let owner = match owner_id(&user) {
        Ok(owner) => owner,
        Err(resp) => return resp,
    };
    let id = match parse_itinerary_id(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let input = input.into_inner();
    let (trip_name, countries, duration_days) = match validated_fields(&input) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };

    let collection = match data.itineraries() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    // Existing activities drive the remaining-budget recompute
    let existing = match collection
        .find_one(doc! { "_id": id, "user_id": owner })
        .await
    {
        Ok(Some(itinerary)) => itinerary,
        Ok(None) => return not_found(),
        Err(err) => {
            log::error!("Failed to retrieve itinerary: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to update itinerary");
        }
    };

    let total_budget = input.total_budget.unwrap_or(existing.total_budget);
    let remaining_budget = ItineraryPlanner::remaining_budget(total_budget, &existing.activities);

    let update = ItineraryUpdate {
        trip_name,
        description: input.description,
        countries,
        start_date: input.start_date,
        end_date: input.end_date,
        duration_days,
        total_budget,
        remaining_budget,
        status: input.status.unwrap_or(existing.status),
        priority: input.priority,
        favorite: input.favorite.unwrap_or(existing.favorite),
        updated_at: Utc::now(),
    };

    let updates = match bson::to_document(&update) {
        Ok(document) => document,
        Err(err) => {
            log::error!("Failed to serialize itinerary update: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to update itinerary");
        }
    };

    match collection
        .update_one(doc! { "_id": id, "user_id": owner }, doc! { "$set": updates })
        .await
    {
        Ok(result) if result.matched_count == 0 => not_found(),
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "message": "Itinerary updated" })),
        Err(err) => {
            log::error!("Failed to update itinerary: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update itinerary")
        }
    }
}

/*
    DELETE /api/itineraries/{id}
*/
pub async fn delete(
    user: AuthenticatedUser,
    data: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let owner = match owner_id(&user) {
        Ok(owner) => owner,
        Err(resp) => return resp,
    };
    let id = match parse_itinerary_id(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let collection = match data.itineraries() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    match collection
        .delete_one(doc! { "_id": id, "user_id": owner })
        .await
    {
        Ok(result) if result.deleted_count == 0 => not_found(),
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "message": "Itinerary deleted" })),
        Err(err) => {
            log::error!("Failed to delete itinerary: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete itinerary")
        }
    }
}

/*
    POST /api/itineraries/{id}/duplicate
*/
pub async fn duplicate(
    user: AuthenticatedUser,
    data: web::Data<Store>,
    path: web::Path<String>,
) -> impl Responder {
    let owner = match owner_id(&user) {
        Ok(owner) => owner,
        Err(resp) => return resp,
    };
    let id = match parse_itinerary_id(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let collection = match data.itineraries() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    let original = match collection
        .find_one(doc! { "_id": id, "user_id": owner })
        .await
    {
        Ok(Some(itinerary)) => itinerary,
        Ok(None) => return not_found(),
        Err(err) => {
            log::error!("Failed to retrieve itinerary: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to duplicate itinerary");
        }
    };

    let copy = ItineraryPlanner::duplicate(&original);

    match collection.insert_one(&copy).await {
        Ok(result) => HttpResponse::Created().json(serde_json::json!({
            "_id": result.inserted_id,
            "message": "Itinerary duplicated"
        })),
        Err(err) => {
            log::error!("Failed to insert duplicated itinerary: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to duplicate itinerary")
        }
    }
}

/*
    POST /api/itineraries/generate
*/
pub async fn generate(
    user: AuthenticatedUser,
    data: web::Data<Store>,
    input: web::Json<GenerateItineraryInput>,
) -> impl Responder {
    let owner = match owner_id(&user) {
        Ok(owner) => owner,
        Err(resp) => return resp,
    };

    let today = Utc::now().date_naive();
    let mut itinerary = match ItineraryPlanner::generate(&input.into_inner(), today) {
        Some(itinerary) => itinerary,
        None => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Duration must be positive" }))
        }
    };
    itinerary.user_id = Some(owner);

    let collection = match data.itineraries() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    match collection.insert_one(&itinerary).await {
        Ok(result) => HttpResponse::Created().json(serde_json::json!({
            "_id": result.inserted_id,
            "message": "Itinerary generated",
            "countries": itinerary.countries,
        })),
        Err(err) => {
            log::error!("Failed to insert generated itinerary: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to generate itinerary")
        }
    }
}

/*
    POST /api/itineraries/{id}/activities

    The push and the budget decrement ride the same update so concurrent
    additions cannot lose either side.
*/
pub async fn add_activity(
    user: AuthenticatedUser,
    data: web::Data<Store>,
    path: web::Path<String>,
    input: web::Json<ActivityInput>,
) -> impl Responder {
    let owner = match owner_id(&user) {
        Ok(owner) => owner,
        Err(resp) => return resp,
    };
    let id = match parse_itinerary_id(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let input = input.into_inner();
    let country = input.country.trim().to_string();
    let city = input.city.trim().to_string();
    let description = input.description.trim().to_string();
    if country.is_empty() || city.is_empty() || description.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Country, city and activity are required" }));
    }

    let collection = match data.itineraries() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    let cost = input.cost.unwrap_or(0.0);
    let activity = ItineraryActivity {
        id: Uuid::new_v4(),
        country,
        city,
        description,
        activity_type: input.activity_type,
        cost,
        date: input.date,
        completed: false,
        created_at: Some(Utc::now()),
    };

    let activity_bson = match bson::to_bson(&activity) {
        Ok(value) => value,
        Err(err) => {
            log::error!("Failed to serialize activity: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to add activity");
        }
    };

    match collection
        .update_one(
            doc! { "_id": id, "user_id": owner },
            activity_push_update(activity_bson, cost),
        )
        .await
    {
        Ok(result) if result.matched_count == 0 => not_found(),
        Ok(_) => HttpResponse::Created().json(serde_json::json!({
            "activity_id": activity.id,
            "message": "Activity added"
        })),
        Err(err) => {
            log::error!("Failed to add activity: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to add activity")
        }
    }
}

/*
    DELETE /api/itineraries/{id}/activities/{activity_id}

    Pull and budget restore are one atomic update, mirroring add_activity.
*/
pub async fn remove_activity(
    user: AuthenticatedUser,
    data: web::Data<Store>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let owner = match owner_id(&user) {
        Ok(owner) => owner,
        Err(resp) => return resp,
    };
    let (raw_id, raw_activity_id) = path.into_inner();
    let id = match parse_itinerary_id(&raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let activity_id = match Uuid::parse_str(&raw_activity_id) {
        Ok(activity_id) => activity_id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid activity ID"),
    };

    let collection = match data.itineraries() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    // The cost to restore comes from the stored activity, not the client
    let itinerary = match collection
        .find_one(doc! { "_id": id, "user_id": owner })
        .await
    {
        Ok(Some(itinerary)) => itinerary,
        Ok(None) => return not_found(),
        Err(err) => {
            log::error!("Failed to retrieve itinerary: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to remove activity");
        }
    };

    let cost = match itinerary.activities.iter().find(|a| a.id == activity_id) {
        Some(activity) => activity.cost,
        None => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Activity not found" }))
        }
    };

    match collection
        .update_one(
            doc! { "_id": id, "user_id": owner, "activities.id": activity_id.to_string() },
            activity_pull_update(activity_id, cost),
        )
        .await
    {
        Ok(result) if result.matched_count == 0 => {
            // The activity disappeared between the read and the update
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Activity not found" }))
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "message": "Activity removed" })),
        Err(err) => {
            log::error!("Failed to remove activity: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to remove activity")
        }
    }
}

/*
    PUT /api/itineraries/{id}/activities/{activity_id}/toggle

    Async caller contract: always a structured JSON body, never a redirect.
*/
pub async fn toggle_activity(
    user: AuthenticatedUser,
    data: web::Data<Store>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let owner = match owner_id(&user) {
        Ok(owner) => owner,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "success": false, "error": "Invalid user ID" }))
        }
    };
    let (raw_id, raw_activity_id) = path.into_inner();
    let id = match parse_itinerary_id(&raw_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "success": false, "error": "Invalid ID" }))
        }
    };
    let activity_id = match Uuid::parse_str(&raw_activity_id) {
        Ok(activity_id) => activity_id,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "success": false, "error": "Invalid activity ID" }))
        }
    };

    let collection = match data.itineraries() {
        Ok(collection) => collection,
        Err(_) => {
            return HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "success": false,
                "error": "Demo mode: database unavailable"
            }))
        }
    };

    let itinerary = match collection
        .find_one(doc! { "_id": id, "user_id": owner })
        .await
    {
        Ok(Some(itinerary)) => itinerary,
        Ok(None) => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "success": false, "error": "Itinerary not found" }))
        }
        Err(err) => {
            log::error!("Failed to retrieve itinerary: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "success": false, "error": "Failed to toggle activity" }));
        }
    };

    let toggled = match toggle_target(&itinerary.activities, activity_id) {
        Some(toggled) => toggled,
        None => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "success": false, "error": "Activity not found" }))
        }
    };

    let update = doc! {
        "$set": {
            "activities.$.completed": toggled,
            "updated_at": bson_datetime(&Utc::now()),
        }
    };

    match collection
        .update_one(
            doc! { "_id": id, "user_id": owner, "activities.id": activity_id.to_string() },
            update,
        )
        .await
    {
        Ok(result) if result.matched_count == 0 => HttpResponse::NotFound()
            .json(serde_json::json!({ "success": false, "error": "Activity not found" })),
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "completed": toggled
        })),
        Err(err) => {
            log::error!("Failed to toggle activity: {:?}", err);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "success": false, "error": "Failed to toggle activity" }))
        }
    }
}
