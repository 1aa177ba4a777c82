use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::db::mongo::Store;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(data: web::Data<Store>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mongo_status = if data.is_demo() {
        health.status = "degraded".to_string();
        ServiceStatus {
            status: "demo".to_string(),
            details: Some("database unavailable; running in demo mode".to_string()),
        }
    } else {
        ServiceStatus {
            status: "connected".to_string(),
            details: None,
        }
    };
    health.services.insert("mongodb".to_string(), mongo_status);

    HttpResponse::Ok().json(health)
}
