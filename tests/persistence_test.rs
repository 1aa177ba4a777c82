mod common;

use actix_web::test;
use mongodb::bson::doc;
use serde_json::json;
use serial_test::serial;
use uuid::Uuid;

use common::{bearer, TestApp};
use travelasia_api::db::mongo::Store;

// Needs a running MongoDB; skips when MONGODB_URI is unset or unreachable.

const TEST_EMAIL: &str = "budget.tester@example.com";
const TEST_TRIP: &str = "Budget check trip";

async fn cleanup_test_data(store: &Store) {
    if let Ok(users) = store.users() {
        let _ = users.delete_many(doc! { "email": TEST_EMAIL }).await;
    }
    if let Ok(itineraries) = store.itineraries() {
        let _ = itineraries.delete_many(doc! { "trip_name": TEST_TRIP }).await;
    }
}

#[actix_rt::test]
#[serial]
async fn test_persistence_round_trip() {
    let test_app = match TestApp::connected().await {
        Some(test_app) => test_app,
        None => return,
    };
    cleanup_test_data(&test_app.store).await;

    let app = test::init_service(test_app.create_app()).await;

    // Step 1: register and keep the token
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&json!({
            "name": "Budget Tester",
            "email": TEST_EMAIL,
            "password": "secret123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["auth_token"]
        .as_str()
        .expect("registration should return a token")
        .to_string();

    // Step 2: the same address with different casing and whitespace is a
    // duplicate, not a second account
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&json!({
            "name": "Budget Tester",
            "email": "  Budget.Tester@EXAMPLE.com ",
            "password": "secret456"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // Step 3: create an itinerary with a 2000 budget
    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(bearer(&token))
        .set_json(&json!({
            "trip_name": TEST_TRIP,
            "countries": ["Japan"],
            "start_date": "2027-04-01",
            "end_date": "2027-04-11",
            "total_budget": 2000.0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let itinerary_id = body["_id"]["$oid"]
        .as_str()
        .expect("creation should return the new id")
        .to_string();
    let itinerary_uri = format!("/api/itineraries/{}", itinerary_id);

    // Step 4: adding an activity spends exactly its cost
    let req = test::TestRequest::post()
        .uri(&format!("{}/activities", itinerary_uri))
        .insert_header(bearer(&token))
        .set_json(&json!({
            "country": "Japan",
            "city": "Kyoto",
            "description": "Fushimi Inari hike",
            "cost": 250.5
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let activity_id = body["activity_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&itinerary_uri)
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["remaining_budget"], 1749.5);

    // Step 5: toggling a well-formed but unknown activity id is a
    // structured not-found, never a success
    let req = test::TestRequest::put()
        .uri(&format!(
            "{}/activities/{}/toggle",
            itinerary_uri,
            Uuid::new_v4()
        ))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    // Step 6: removing the activity restores the budget in full
    let req = test::TestRequest::delete()
        .uri(&format!("{}/activities/{}", itinerary_uri, activity_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get()
        .uri(&itinerary_uri)
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["remaining_budget"], 2000.0);

    cleanup_test_data(&test_app.store).await;
}
