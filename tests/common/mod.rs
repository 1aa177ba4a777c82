use actix_cors::Cors;
use actix_web::{guard, middleware::Logger, web, App};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::bson::oid::ObjectId;

use travelasia_api::db::mongo::Store;
use travelasia_api::middleware::auth::{AuthMiddleware, Claims};
use travelasia_api::routes;

/// App wired with the real handlers against a demo-mode store, so the whole
/// surface is exercisable without a running MongoDB.
pub struct TestApp {
    pub store: Store,
}

impl TestApp {
    pub fn demo() -> Self {
        Self {
            store: Store::demo(),
        }
    }

    /// App backed by the MongoDB named in MONGODB_URI. None when the
    /// variable is unset or the connection fails, so database-backed tests
    /// skip cleanly on machines without a running instance.
    #[allow(dead_code)]
    pub async fn connected() -> Option<Self> {
        let uri = std::env::var("MONGODB_URI").ok()?;
        let store = Store::connect(&uri).await;
        if store.is_demo() {
            return None;
        }
        store.ensure_indexes().await;
        Some(Self { store })
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.store.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(routes::account::auth::register))
                            .route("/login", web::post().to(routes::account::auth::login))
                            .service(
                                web::scope("")
                                    .wrap(AuthMiddleware)
                                    .route(
                                        "/session",
                                        web::get().to(routes::account::auth::user_session),
                                    )
                                    .route(
                                        "/logout",
                                        web::post().to(routes::account::auth::logout),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/tours")
                            .route("", web::get().to(routes::tour::get_catalog))
                            .route("/quote", web::post().to(routes::tour::quote))
                            .route("/{key}", web::get().to(routes::tour::get_tour)),
                    )
                    .service(
                        web::scope("/destinations")
                            .guard(guard::Get())
                            .route("", web::get().to(routes::destination::get_all))
                            .route("/{id}", web::get().to(routes::destination::get_by_id)),
                    )
                    .service(
                        web::scope("/destinations")
                            .wrap(AuthMiddleware)
                            .route("", web::post().to(routes::destination::create))
                            .service(
                                web::resource("/{id}")
                                    .route(web::put().to(routes::destination::update))
                                    .route(web::delete().to(routes::destination::delete)),
                            ),
                    )
                    .service(
                        web::scope("/itineraries")
                            .wrap(AuthMiddleware)
                            .service(
                                web::resource("")
                                    .route(web::get().to(routes::itinerary::get_own))
                                    .route(web::post().to(routes::itinerary::create)),
                            )
                            .route("/generate", web::post().to(routes::itinerary::generate))
                            .route(
                                "/{id}/duplicate",
                                web::post().to(routes::itinerary::duplicate),
                            )
                            .route(
                                "/{id}/activities",
                                web::post().to(routes::itinerary::add_activity),
                            )
                            .route(
                                "/{id}/activities/{activity_id}/toggle",
                                web::put().to(routes::itinerary::toggle_activity),
                            )
                            .route(
                                "/{id}/activities/{activity_id}",
                                web::delete().to(routes::itinerary::remove_activity),
                            )
                            .service(
                                web::resource("/{id}")
                                    .route(web::get().to(routes::itinerary::get_by_id))
                                    .route(web::put().to(routes::itinerary::update))
                                    .route(web::delete().to(routes::itinerary::delete)),
                            ),
                    )
                    .service(
                        web::scope("/account").wrap(AuthMiddleware).route(
                            "/profile",
                            web::put().to(routes::account::profile::update_profile),
                        ),
                    ),
            )
    }
}

/// Bearer token signed with the middleware's fallback secret.
#[allow(dead_code)]
pub fn test_token() -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: "test@example.com".to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(1)).timestamp() as usize,
        user_id: ObjectId::new().to_string(),
    };

    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret("default_secret".as_ref()),
    )
    .expect("failed to sign test token")
}

#[allow(dead_code)]
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
