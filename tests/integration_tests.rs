use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Local;
use serde_json::{json, Value};
use tower::ServiceExt;

use barbershop::config::AppConfig;
use barbershop::routes;
use barbershop::state::AppState;
use barbershop::store::BookingStore;

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        seed_mock_data: false,
        ..AppConfig::default()
    }
}

fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(test_config(), BookingStore::new()).unwrap())
}

fn test_app(state: Arc<AppState>) -> Router {
    routes::router(state)
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

async fn send(state: &Arc<AppState>, req: Request<Body>) -> (StatusCode, Value) {
    let res = test_app(state.clone()).oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_as(uri: &str, pin: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {pin}"))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn start_wizard(state: &Arc<AppState>) -> String {
    let (status, json) = send(state, post_json("/api/wizard", json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

async fn act(state: &Arc<AppState>, id: &str, action: Value) -> (StatusCode, Value) {
    send(state, post_json(&format!("/api/wizard/{id}/actions"), action)).await
}

async fn next(state: &Arc<AppState>, id: &str) -> Value {
    let (status, json) = act(state, id, json!({"action": "next"})).await;
    assert_eq!(status, StatusCode::OK, "next rejected: {json}");
    json
}

/// Walks a new customer through the wizard and returns the booked view.
async fn book(state: &Arc<AppState>, phone: &str, services: &[&str], barber: &str, time: &str) -> Value {
    let id = start_wizard(state).await;

    act(state, &id, json!({"action": "set_phone", "phone": phone})).await;
    next(state, &id).await;
    act(state, &id, json!({"action": "set_code", "code": "1234"})).await;
    let view = next(state, &id).await;
    if view["step"] == "details" {
        act(state, &id, json!({"action": "set_name", "name": "Sam"})).await;
        next(state, &id).await;
    }
    for service in services {
        act(state, &id, json!({"action": "toggle_service", "service_id": service})).await;
    }
    next(state, &id).await;
    act(state, &id, json!({"action": "select_barber", "barber_id": barber})).await;
    next(state, &id).await;
    let (status, _) = act(state, &id, json!({"action": "select_time", "time": time})).await;
    assert_eq!(status, StatusCode::OK);
    next(state, &id).await;
    next(state, &id).await
}

fn slots(json: &Value) -> Vec<String> {
    json["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

// ── Catalog ──

#[tokio::test]
async fn test_health() {
    let state = test_state();
    let res = test_app(state).oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_landing_page() {
    let state = test_state();
    let res = test_app(state).oneshot(get("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_services() {
    let state = test_state();
    let (status, json) = send(&state, get("/api/services")).await;
    assert_eq!(status, StatusCode::OK);
    let services = json.as_array().unwrap();
    assert_eq!(services.len(), 6);
    assert_eq!(services[0]["id"], "haircut");
    assert_eq!(services[0]["duration_minutes"], 30);
}

#[tokio::test]
async fn test_list_barbers_hides_pin() {
    let state = test_state();
    let (status, json) = send(&state, get("/api/barbers")).await;
    assert_eq!(status, StatusCode::OK);
    let barbers = json.as_array().unwrap();
    assert_eq!(barbers.len(), 3);
    assert!(barbers.iter().all(|b| b.get("pin").is_none()));
}

// ── Availability ──

#[tokio::test]
async fn test_availability_without_barber_is_full_grid() {
    let state = test_state();
    let (status, json) = send(&state, get("/api/availability")).await;
    assert_eq!(status, StatusCode::OK);
    let grid = slots(&json);
    assert_eq!(grid.len(), 21);
    assert_eq!(grid.first().unwrap(), "09:00");
    assert_eq!(grid.last().unwrap(), "19:00");
}

#[tokio::test]
async fn test_availability_unknown_barber() {
    let state = test_state();
    let (status, json) = send(&state, get("/api/availability?barber_id=b9")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("b9"));
}

#[tokio::test]
async fn test_availability_reflects_seeded_bookings() {
    let today = Local::now().date_naive();
    let state = Arc::new(AppState::new(test_config(), BookingStore::seeded(today)).unwrap());

    let uri = format!("/api/availability?barber_id=b1&date={}", today.format("%Y-%m-%d"));
    let (_, json) = send(&state, get(&uri)).await;
    let free = slots(&json);
    // bk1 09:00, bk2 10:00, bk3 13:00-13:50
    assert!(!free.contains(&"09:00".to_string()));
    assert!(free.contains(&"09:30".to_string()));
    assert!(!free.contains(&"10:00".to_string()));
    assert!(!free.contains(&"13:30".to_string()));
    assert!(free.contains(&"14:00".to_string()));

    let uri = format!(
        "/api/availability?barber_id=b1&date={}&duration=50",
        today.format("%Y-%m-%d")
    );
    let (_, json) = send(&state, get(&uri)).await;
    // 50 minutes from 09:30 runs into bk2 at 10:00
    assert!(!slots(&json).contains(&"09:30".to_string()));
}

#[tokio::test]
async fn test_availability_rejects_oversized_duration() {
    let today = Local::now().date_naive();
    let state = Arc::new(AppState::new(test_config(), BookingStore::seeded(today)).unwrap());

    let uri = format!(
        "/api/availability?barber_id=b1&date={}&duration=4294967295",
        today.format("%Y-%m-%d")
    );
    let (status, json) = send(&state, get(&uri)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("duration"));

    // A full day is still accepted; nothing fits around the seeded bookings
    let uri = format!(
        "/api/availability?barber_id=b1&date={}&duration=1440",
        today.format("%Y-%m-%d")
    );
    let (status, json) = send(&state, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(slots(&json).is_empty());
}

// ── Wizard ──

#[tokio::test]
async fn test_wizard_starts_at_phone() {
    let state = test_state();
    let (status, json) = send(&state, post_json("/api/wizard", json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["step"], "phone");
    assert_eq!(json["date"], today());
    assert_eq!(json["progress"]["position"], 1);
    assert_eq!(json["progress"]["total"], 7);
}

#[tokio::test]
async fn test_wizard_unknown_session() {
    let state = test_state();
    let (status, _) = send(&state, get("/api/wizard/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = act(&state, "missing", json!({"action": "next"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wizard_short_phone_blocked() {
    let state = test_state();
    let id = start_wizard(&state).await;

    act(&state, &id, json!({"action": "set_phone", "phone": "555"})).await;
    let (status, json) = act(&state, &id, json!({"action": "next"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().is_some());

    let (_, json) = send(&state, get(&format!("/api/wizard/{id}"))).await;
    assert_eq!(json["step"], "phone");
}

#[tokio::test]
async fn test_wizard_wrong_step_action() {
    let state = test_state();
    let id = start_wizard(&state).await;
    let (status, _) = act(&state, &id, json!({"action": "select_barber", "barber_id": "b1"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_wizard_back_from_phone_exits() {
    let state = test_state();
    let id = start_wizard(&state).await;

    let (status, json) = act(&state, &id, json!({"action": "back"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["exited"], true);

    let (status, _) = send(&state, get(&format!("/api/wizard/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wizard_returning_customer_skips_details() {
    let state = test_state();
    let id = start_wizard(&state).await;

    act(&state, &id, json!({"action": "set_phone", "phone": "+1 (234) 567-890"})).await;
    next(&state, &id).await;
    act(&state, &id, json!({"action": "set_code", "code": "4321"})).await;
    let json = next(&state, &id).await;

    assert_eq!(json["step"], "services");
    assert_eq!(json["returning"], true);
    assert_eq!(json["name"], "Jake L");
    assert_eq!(json["progress"]["total"], 6);

    let (_, json) = act(&state, &id, json!({"action": "back"})).await;
    assert_eq!(json["step"], "otp");
}

#[tokio::test]
async fn test_wizard_books_and_blocks_slot() {
    let state = test_state();
    let json = book(&state, "+1 555 000 1111", &["haircut"], "b1", "09:00").await;

    assert_eq!(json["step"], "booked");
    let booking = &json["booking"];
    assert_eq!(booking["barber_id"], "b1");
    assert_eq!(booking["time"], "09:00");
    assert_eq!(booking["date"], today());
    assert_eq!(booking["customer_name"], "Sam");
    assert_eq!(booking["status"], "confirmed");
    assert!(booking["id"].as_str().unwrap().starts_with("bk_"));

    let uri = format!("/api/availability?barber_id=b1&date={}", today());
    let (_, json) = send(&state, get(&uri)).await;
    assert!(!slots_contains(&json, "09:00"));
    assert!(slots_contains(&json, "09:30"));

    let uri = format!("/api/availability?barber_id=b2&date={}", today());
    let (_, json) = send(&state, get(&uri)).await;
    assert!(slots_contains(&json, "09:00"));
}

fn slots_contains(json: &Value, time: &str) -> bool {
    slots(json).iter().any(|s| s == time)
}

#[tokio::test]
async fn test_wizard_combined_services_duration() {
    let state = test_state();
    let json = book(&state, "+1 555 000 2222", &["haircut", "beard"], "b2", "10:00").await;

    assert_eq!(json["total_duration_minutes"], 50);
    assert_eq!(json["total_price"], 55);
    assert_eq!(json["booking"]["duration_minutes"], 50);

    let uri = format!("/api/availability?barber_id=b2&date={}", today());
    let (_, json) = send(&state, get(&uri)).await;
    assert!(!slots_contains(&json, "10:30"));
    assert!(slots_contains(&json, "11:00"));
}

#[tokio::test]
async fn test_wizard_taken_slot_rejected() {
    let state = test_state();
    book(&state, "+1 555 000 3333", &["haircut"], "b3", "11:00").await;

    let id = start_wizard(&state).await;
    act(&state, &id, json!({"action": "set_phone", "phone": "+1 555 000 4444"})).await;
    next(&state, &id).await;
    act(&state, &id, json!({"action": "set_code", "code": "1234"})).await;
    next(&state, &id).await;
    act(&state, &id, json!({"action": "set_name", "name": "Lee"})).await;
    next(&state, &id).await;
    act(&state, &id, json!({"action": "toggle_service", "service_id": "haircut"})).await;
    next(&state, &id).await;
    act(&state, &id, json!({"action": "select_barber", "barber_id": "b3"})).await;
    let json = next(&state, &id).await;
    assert_eq!(json["step"], "time");
    assert!(!json["available_slots"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s == "11:00"));

    let (status, _) = act(&state, &id, json!({"action": "select_time", "time": "11:00"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Dashboard ──

#[tokio::test]
async fn test_dashboard_login() {
    let state = test_state();

    let (status, json) = send(&state, post_json("/api/dashboard/login", json!({"pin": "0000"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json["error"].as_str().unwrap().contains("Incorrect PIN"));

    let (status, json) = send(&state, post_json("/api/dashboard/login", json!({"pin": "1234"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Marcus");
    assert!(json.get("pin").is_none());
}

#[tokio::test]
async fn test_dashboard_requires_pin() {
    let state = test_state();
    let (status, _) = send(&state, get("/api/dashboard/week")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&state, get_as("/api/dashboard/week", "9999")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_week_view() {
    let state = test_state();
    book(&state, "+1 555 000 5555", &["full"], "b1", "13:00").await;

    let (status, json) = send(&state, get_as("/api/dashboard/week", "1234")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["barber"]["id"], "b1");
    assert_eq!(json["offset"], 0);
    assert_eq!(json["today_count"], 1);
    assert_eq!(json["days"].as_array().unwrap().len(), 6);
    assert_eq!(json["days"][0]["label"], "Mon");
    assert_eq!(json["columns"].as_array().unwrap().len(), 22);

    // Another barber sees none of it
    let (_, json) = send(&state, get_as("/api/dashboard/week", "5678")).await;
    assert_eq!(json["today_count"], 0);

    let (_, json) = send(&state, get_as("/api/dashboard/week?offset=-1", "1234")).await;
    assert_eq!(json["offset"], -1);
    assert!(json["days"]
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["bookings"].as_array().unwrap().is_empty()));
}

#[tokio::test]
async fn test_dashboard_cancel_frees_slot() {
    let state = test_state();
    let json = book(&state, "+1 555 000 6666", &["haircut"], "b1", "09:00").await;
    let booking_id = json["booking"]["id"].as_str().unwrap().to_string();

    // Jake cannot touch Marcus's booking
    let cancel = |pin: &str| {
        Request::builder()
            .method("POST")
            .uri(format!("/api/dashboard/bookings/{booking_id}/cancel"))
            .header("Authorization", format!("Bearer {pin}"))
            .body(Body::empty())
            .unwrap()
    };
    let (status, _) = send(&state, cancel("5678")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&state, get_as(&format!("/api/dashboard/bookings/{booking_id}"), "1234")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["service_names"][0], "Haircut");

    let (status, json) = send(&state, cancel("1234")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "canceled");

    let uri = format!("/api/availability?barber_id=b1&date={}", today());
    let (_, json) = send(&state, get(&uri)).await;
    assert!(slots_contains(&json, "09:00"));

    let (_, json) = send(&state, get_as("/api/dashboard/week", "1234")).await;
    assert_eq!(json["today_count"], 0);
}

#[tokio::test]
async fn test_dashboard_unknown_booking() {
    let state = test_state();
    let (status, _) = send(&state, get_as("/api/dashboard/bookings/bk404", "1234")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
