use actix_cors::Cors;
use actix_web::{guard, middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travelasia_api::db::mongo::Store;
use travelasia_api::middleware::auth::AuthMiddleware;
use travelasia_api::routes;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let store = match std::env::var("MONGODB_URI") {
        Ok(uri) => Store::connect(&uri).await,
        Err(_) => {
            log::warn!("MONGODB_URI not set; starting in demo mode");
            Store::demo()
        }
    };
    store.ensure_indexes().await;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(store.clone()))
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
                    // Public reads; anything else on /destinations falls
                    // through to the session-guarded scope below
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
    })
    .bind((host, port))?
    .run()
    .await
}
