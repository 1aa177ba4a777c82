use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use mongodb::bson::{self, doc, oid::ObjectId};

use crate::db::mongo::Store;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::user::ProfileUpdate;
use crate::routes::{bson_datetime, demo_mode_response};

/*
    PUT /api/account/profile

    Only the caller's own record; email and password changes are out of
    scope for this endpoint.
*/
pub async fn update_profile(
    user: AuthenticatedUser,
    data: web::Data<Store>,
    input: web::Json<ProfileUpdate>,
) -> impl Responder {
    let user_id = match ObjectId::parse_str(&user.user_id) {
        Ok(user_id) => user_id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let input = input.into_inner();
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Name cannot be blank" }));
        }
    }

    let collection = match data.users() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    let mut updates = match bson::to_document(&input) {
        Ok(document) => document,
        Err(err) => {
            log::error!("Failed to serialize profile update: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to update profile");
        }
    };
    updates.insert("updated_at", bson_datetime(&Utc::now()));

    match collection
        .update_one(doc! { "_id": user_id }, doc! { "$set": updates })
        .await
    {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "User not found" }))
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "message": "Profile updated" })),
        Err(err) => {
            log::error!("Failed to update profile: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update profile")
        }
    }
}
