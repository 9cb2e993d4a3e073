//! End-to-end tests against the full router and an in-memory database.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use dms_api::config::EMERGENCY_CONTACTS;
use dms_api::service::Record;
use dms_api::{
    all_resources, app_router, apply_migrations, connect_in_memory, resolve, AppState, CrudService, Settings,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

async fn setup() -> (Router, SqlitePool) {
    let pool = connect_in_memory().await.unwrap();
    let model = resolve(all_resources()).unwrap();
    apply_migrations(&pool, &model).await.unwrap();
    let state = AppState {
        pool: pool.clone(),
        model: Arc::new(model),
    };
    (app_router(state, &Settings::default()), pool)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn flood_alert() -> Value {
    json!({
        "type": "Flood Warning",
        "location": "Zone 1",
        "severity": "warning",
        "description": "Rising water"
    })
}

fn shelter() -> Value {
    json!({
        "name": "Central Community Shelter",
        "address": "123 Main Street, Downtown",
        "latitude": 40.7589,
        "longitude": -73.9851,
        "capacity": 500,
        "available": 320,
        "amenities": ["Food", "Medical"],
        "contact": "(555) 123-4567",
        "status": "open"
    })
}

fn reading(location: &str, humidity: f64) -> Value {
    json!({
        "temperature": 22.2,
        "windSpeed": 24.1,
        "humidity": humidity,
        "conditions": "Partly Cloudy",
        "location": location
    })
}

#[tokio::test]
async fn health_and_ready() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
    assert_eq!(body["resources"], 6);
}

#[tokio::test]
async fn create_alert_returns_created_row() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, Method::POST, "/api/alerts", Some(flood_alert())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Alert created successfully");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["isActive"], true);
    assert_eq!(body["data"]["severity"], "warning");
    assert!(body["data"]["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));
}

#[tokio::test]
async fn create_alert_validation_errors() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, Method::POST, "/api/alerts", Some(json!({ "type": "Flood" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_REQUIRED_FIELDS");

    let mut alert = flood_alert();
    alert["severity"] = json!("extreme");
    let (status, body) = send(&app, Method::POST, "/api/alerts", Some(alert)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SEVERITY");
}

#[tokio::test]
async fn unknown_alert_is_404() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, Method::GET, "/api/alerts?id=999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Alert not found" }));
}

#[tokio::test]
async fn alert_delete_deactivates() {
    let (app, _pool) = setup().await;
    send(&app, Method::POST, "/api/alerts", Some(flood_alert())).await;

    let (status, body) = send(&app, Method::DELETE, "/api/alerts?id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Alert deactivated successfully");
    assert_eq!(body["data"]["isActive"], false);

    let (status, body) = send(&app, Method::GET, "/api/alerts?id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], false);

    let (_, body) = send(&app, Method::GET, "/api/alerts", None).await;
    assert_eq!(body["data"]["alerts"], json!([]));
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn alert_update_can_reactivate() {
    let (app, _pool) = setup().await;
    send(&app, Method::POST, "/api/alerts", Some(flood_alert())).await;
    send(&app, Method::DELETE, "/api/alerts?id=1", None).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/alerts?id=1",
        Some(json!({ "isActive": true, "severity": "critical" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], true);
    assert_eq!(body["severity"], "critical");

    let (status, body) = send(&app, Method::PUT, "/api/alerts?id=1", Some(json!({ "isActive": "yes" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_IS_ACTIVE");
}

#[tokio::test]
async fn alert_list_filters_and_orders_newest_first() {
    let (app, _pool) = setup().await;
    send(&app, Method::POST, "/api/alerts", Some(flood_alert())).await;
    let mut second = flood_alert();
    second["severity"] = json!("critical");
    second["location"] = json!("Coastal Region A");
    send(&app, Method::POST, "/api/alerts", Some(second)).await;

    let (_, body) = send(&app, Method::GET, "/api/alerts?severity=critical", None).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["alerts"][0]["location"], "Coastal Region A");

    let (_, body) = send(&app, Method::GET, "/api/alerts?location=coastal", None).await;
    assert_eq!(body["data"]["total"], 1);

    let (_, body) = send(&app, Method::GET, "/api/alerts", None).await;
    let alerts = body["data"]["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert!(alerts[0]["timestamp"].as_str() >= alerts[1]["timestamp"].as_str());
    assert!(body["data"]["lastUpdated"].is_string());
}

#[tokio::test]
async fn contact_lifecycle_with_hard_delete() {
    let (app, _pool) = setup().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/emergency-contacts",
        Some(json!({ "category": "Emergency Services", "number": "(555) 123-4567", "iconName": "phone" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_REQUIRED_FIELD");
    assert_eq!(body["error"], "Name is required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/emergency-contacts",
        Some(json!({ "category": "Emergency Services", "name": "Fire", "number": "abc", "iconName": "phone" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PHONE_NUMBER");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/emergency-contacts",
        Some(json!({ "category": "Emergency Services", "name": "Fire Department", "number": "(555) 123-4567", "iconName": "phone" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["iconName"], "phone");
    let id = body["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/emergency-contacts?id={}", id);
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Emergency contact deleted successfully");
    assert_eq!(body["data"]["name"], "Fire Department");

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Emergency contact not found");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_search_and_sort() {
    let (app, _pool) = setup().await;
    for (category, name, number) in [
        ("Disaster Response", "Red Cross Emergency", "1-800-733-2767"),
        ("Emergency Services", "Police Department", "(555) 234-5678"),
        ("Support Services", "Crisis Counseling", "1-800-985-5990"),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/emergency-contacts",
            Some(json!({ "category": category, "name": name, "number": number, "iconName": "phone" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, Method::GET, "/api/emergency-contacts", None).await;
    let names: Vec<&str> = body["data"]["contacts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Crisis Counseling", "Police Department", "Red Cross Emergency"]);

    let (_, body) = send(&app, Method::GET, "/api/emergency-contacts?search=1-800", None).await;
    assert_eq!(body["data"]["total"], 2);

    let (_, body) = send(&app, Method::GET, "/api/emergency-contacts?category=Support%20Services", None).await;
    assert_eq!(body["data"]["contacts"][0]["name"], "Crisis Counseling");

    let (_, body) = send(&app, Method::GET, "/api/emergency-contacts?sort=category&order=desc", None).await;
    assert_eq!(body["data"]["contacts"][0]["category"], "Support Services");
}

#[tokio::test]
async fn list_limit_is_clamped() {
    let (app, pool) = setup().await;
    for i in 0..105 {
        let record: Record = [
            ("category".to_string(), json!("Support Services")),
            ("name".to_string(), json!(format!("Hotline {:03}", i))),
            ("number".to_string(), json!("1-800-453-7381")),
            ("icon_name".to_string(), json!("phone")),
        ]
        .into_iter()
        .collect();
        CrudService::create(&pool, &EMERGENCY_CONTACTS, &record).await.unwrap();
    }

    let (_, body) = send(&app, Method::GET, "/api/emergency-contacts?limit=500", None).await;
    assert_eq!(body["data"]["total"], 100);

    let (_, body) = send(&app, Method::GET, "/api/emergency-contacts", None).await;
    assert_eq!(body["data"]["total"], 10);

    let (_, body) = send(&app, Method::GET, "/api/emergency-contacts?limit=10&offset=100", None).await;
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(body["data"]["contacts"][0]["name"], "Hotline 100");
}

#[tokio::test]
async fn shelter_range_checks() {
    let (app, _pool) = setup().await;
    let mut bad = shelter();
    bad["latitude"] = json!(91);
    let (status, body) = send(&app, Method::POST, "/api/resources/shelters", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_LATITUDE");

    let mut bad = shelter();
    bad["capacity"] = json!(-1);
    let (_, body) = send(&app, Method::POST, "/api/resources/shelters", Some(bad)).await;
    assert_eq!(body["code"], "INVALID_CAPACITY");

    let mut bad = shelter();
    bad["status"] = json!("full");
    let (_, body) = send(&app, Method::POST, "/api/resources/shelters", Some(bad)).await;
    assert_eq!(body["code"], "INVALID_STATUS");
}

#[tokio::test]
async fn shelter_create_and_update() {
    let (app, _pool) = setup().await;
    let mut body = shelter();
    body["amenities"] = json!("Food");
    let (status, created) = send(&app, Method::POST, "/api/resources/shelters", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["amenities"], json!(["Food"]));
    assert_eq!(created["data"]["distance"], Value::Null);

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/resources/shelters?id=1",
        Some(json!({ "available": 999, "status": "limited" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["available"], 999);
    assert_eq!(updated["capacity"], 500);
    assert_eq!(updated["status"], "limited");

    let (_, list) = send(&app, Method::GET, "/api/resources/shelters?status=limited", None).await;
    assert_eq!(list["data"]["shelters"][0]["name"], "Central Community Shelter");

    let (status, _) = send(&app, Method::DELETE, "/api/resources/shelters?id=1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn evacuation_routes() {
    let (app, _pool) = setup().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/resources/evacuation-routes",
        Some(json!({
            "name": "Route A - Coastal Exit",
            "routeFrom": "Coastal Areas",
            "routeTo": "Highland Safety Zone",
            "status": "open",
            "traffic": "light",
            "distance": "15 km"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["routeFrom"], "Coastal Areas");
    assert_eq!(body["message"], "Evacuation route created successfully");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/resources/evacuation-routes?id=1",
        Some(json!({ "traffic": "gridlock" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_TRAFFIC");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/resources/evacuation-routes?id=999",
        Some(json!({ "status": "closed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Evacuation route not found");
}

#[tokio::test]
async fn weather_readings_and_current() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, Method::GET, "/api/weather/current", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No weather data found");

    let (status, body) = send(&app, Method::POST, "/api/weather", Some(reading("Metropolitan Area", 101.0))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_HUMIDITY");

    let (status, _) = send(&app, Method::POST, "/api/weather", Some(reading("Metropolitan Area", 65.0))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, Method::POST, "/api/weather/current", Some(reading("Coastal Region", 78.0))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["windSpeed"], 24.1);

    let (status, body) = send(&app, Method::GET, "/api/weather/current?location=metropolitan", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["location"], "Metropolitan Area");
    assert_eq!(body["data"]["current"]["humidity"], 65.0);

    let (_, body) = send(&app, Method::GET, "/api/weather", None).await;
    assert_eq!(body["data"]["readings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn weather_forecast() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, Method::GET, "/api/weather/forecast?days=3&location=Coastal", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["location"], "Coastal");
    let days = body["data"]["forecast"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["day"], "Today");

    let (_, body) = send(&app, Method::GET, "/api/weather/forecast", None).await;
    assert_eq!(body["data"]["location"], "Default Location");
    assert_eq!(body["data"]["forecast"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn stats_singleton() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Stats record not found");

    let (status, body) = send(&app, Method::POST, "/api/stats", Some(json!({ "peopleAssisted": 1234 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["peopleAssisted"], 1234);
    assert_eq!(body["data"]["activeIncidents"], 0);

    let (status, body) = send(&app, Method::PUT, "/api/stats?id=1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_UPDATE_FIELDS");

    let (status, body) = send(&app, Method::PUT, "/api/stats?id=1", Some(json!({ "activeIncidents": -3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_FIELD_VALUE");

    let (status, body) = send(&app, Method::PUT, "/api/stats?id=1", Some(json!({ "activeIncidents": 12 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activeIncidents"], 12);
    assert!(body["lastUpdated"].is_string());

    let (_, body) = send(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(body["activeIncidents"], 12);
    assert_eq!(body["peopleAssisted"], 1234);
}

#[tokio::test]
async fn id_and_body_errors() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, Method::PUT, "/api/alerts", Some(json!({ "severity": "warning" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ID");

    let (status, body) = send(&app, Method::GET, "/api/alerts?id=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ID");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/alerts")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "INVALID_JSON");
}

#[tokio::test]
async fn mock_auth() {
    let (app, _pool) = setup().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "admin@dms.gov", "password": "admin123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "admin");
    assert!(body["data"]["token"].as_str().unwrap().starts_with("mock-jwt-token-"));

    let (status, body) = send(&app, Method::POST, "/api/auth/login", Some(json!({ "email": "a@b.co" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_REQUIRED_FIELDS");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "name": "Jane", "email": "jane@example.org", "password": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PASSWORD_TOO_SHORT");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "name": "Jane", "email": "jane@example.org", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["name"], "Jane");
    assert!(body["data"]["user"]["createdAt"].is_string());
}
