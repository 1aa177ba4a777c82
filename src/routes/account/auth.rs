use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::error::WriteError;
use serde::{Deserialize, Serialize};

use crate::db::mongo::Store;
use crate::middleware::auth::Claims;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::user::{LoginInput, RegisterInput, UserSession, UserTraveler};
use crate::routes::demo_mode_response;

const MIN_PASSWORD_LEN: usize = 6;
const DEFAULT_USER_TYPE: &str = "traveler";

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    auth_token: String,
}

/*
    POST /api/auth/register
*/
pub async fn register(data: web::Data<Store>, input: web::Json<RegisterInput>) -> impl Responder {
    let input = input.into_inner();

    let name = input.name.trim().to_string();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Name is required" }));
    }

    let email = normalize_email(&input.email);
    if !is_valid_email(&email) {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Invalid email address" }));
    }

    if input.password.len() < MIN_PASSWORD_LEN {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Password must be at least 6 characters"
        }));
    }

    let collection = match data.users() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    let password = match bcrypt::hash(&input.password, bcrypt::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(err) => {
            log::error!("Failed to hash password: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to create user");
        }
    };

    let curr_time = Utc::now();
    let user = UserTraveler {
        id: None,
        email: email.clone(),
        password,
        name,
        user_type: Some(
            input
                .user_type
                .unwrap_or_else(|| DEFAULT_USER_TYPE.to_string()),
        ),
        country_of_interest: input.country_of_interest,
        budget: input.budget,
        last_signin: None,
        failed_signins: None,
        created_at: Some(curr_time),
        updated_at: Some(curr_time),
    };

    match collection.insert_one(&user).await {
        Ok(result) => {
            let user_id = match result.inserted_id.as_object_id() {
                Some(user_id) => user_id,
                None => {
                    return HttpResponse::InternalServerError().body("Failed to create user")
                }
            };
            match generate_token(&email, user_id) {
                Ok(token) => HttpResponse::Created().json(TokenResponse { auth_token: token }),
                Err(_) => HttpResponse::InternalServerError().body("Token generation failed"),
            }
        }
        Err(err) => match *err.kind {
            mongodb::error::ErrorKind::Write(error_info) => match error_info {
                mongodb::error::WriteFailure::WriteError(WriteError { code, .. }) => {
                    if code == 11000 {
                        HttpResponse::Conflict()
                            .json(serde_json::json!({ "error": "Email already registered" }))
                    } else {
                        log::error!("Unexpected write error code: {}", code);
                        HttpResponse::InternalServerError().body("Failed to create user")
                    }
                }
                _ => HttpResponse::InternalServerError().body("Failed to create user"),
            },
            _ => HttpResponse::InternalServerError().body("Failed to create user"),
        },
    }
}

/*
    POST /api/auth/login

    A missing user and a wrong password answer identically.
*/
pub async fn login(data: web::Data<Store>, input: web::Json<LoginInput>) -> impl Responder {
    let input = input.into_inner();
    let email = normalize_email(&input.email);

    let collection = match data.users() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    match collection.find_one(doc! { "email": &email }).await {
        Ok(Some(user)) => {
            if bcrypt::verify(&input.password, &user.password).unwrap_or(false) {
                let update = doc! {
                    "$set": {
                        "last_signin": crate::routes::bson_datetime(&Utc::now()),
                        "failed_signins": 0
                    }
                };

                if let Err(err) = collection.update_one(doc! { "email": &email }, update).await {
                    log::error!("Failed to record signin: {:?}", err);
                    return HttpResponse::InternalServerError().body("Failed to sign in");
                }

                let user_id = match user.id {
                    Some(user_id) => user_id,
                    None => return HttpResponse::InternalServerError().body("Failed to sign in"),
                };

                match generate_token(&email, user_id) {
                    Ok(token) => HttpResponse::Ok().json(TokenResponse { auth_token: token }),
                    Err(_) => {
                        HttpResponse::InternalServerError().body("Token generation failed")
                    }
                }
            } else {
                let failed_signins = user.failed_signins.unwrap_or(0) + 1;
                let update = doc! { "$set": { "failed_signins": failed_signins } };

                match collection.update_one(doc! { "email": &email }, update).await {
                    Ok(_) => HttpResponse::Unauthorized()
                        .json(serde_json::json!({ "error": "Invalid credentials" })),
                    Err(err) => {
                        log::error!("Failed to update failed signins: {:?}", err);
                        HttpResponse::InternalServerError().body("Failed to process login")
                    }
                }
            }
        }
        Ok(None) => {
            HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Invalid credentials" }))
        }
        Err(err) => {
            log::error!("Database error during login: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to process login")
        }
    }
}

/*
    GET /api/auth/session
*/
pub async fn user_session(user: AuthenticatedUser, data: web::Data<Store>) -> impl Responder {
    let user_id = match ObjectId::parse_str(&user.user_id) {
        Ok(user_id) => user_id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let collection = match data.users() {
        Ok(collection) => collection,
        Err(_) => return demo_mode_response(),
    };

    match collection.find_one(doc! { "_id": user_id }).await {
        Ok(Some(user)) => {
            let session = UserSession {
                id: user.id.unwrap_or_default(),
                email: user.email,
                name: user.name,
                user_type: user
                    .user_type
                    .unwrap_or_else(|| DEFAULT_USER_TYPE.to_string()),
                created_at: user.created_at.unwrap_or_default(),
            };
            HttpResponse::Ok().json(session)
        }
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(err) => {
            log::error!("Failed to fetch user: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch user")
        }
    }
}

/*
    POST /api/auth/logout

    Tokens are stateless; the client discards its copy.
*/
pub async fn logout(_user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": "Signed out" }))
}

/// Canonical form stored in the unique email index; case variants of the
/// same address collapse to one key.
fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    match re {
        Ok(re) => re.is_match(email),
        Err(_) => false,
    }
}

fn generate_token(email: &str, user_id: ObjectId) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "default_secret".to_string());
    let now = Utc::now();

    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(24)).timestamp() as usize,
        user_id: user_id.to_string(),
    };

    let header = Header::new(Algorithm::HS256);
    encode(&header, &claims, &EncodingKey::from_secret(secret.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalization_collapses_case_variants() {
        assert_eq!(
            normalize_email("  Viajero@Example.COM "),
            normalize_email("viajero@example.com")
        );
        assert_eq!(normalize_email("UPPER@CASE.ORG"), "upper@case.org");
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("viajero@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld@twice.com"));
        assert!(!is_valid_email(""));
    }
}
