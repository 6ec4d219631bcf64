use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceExt;

use travelbot::config::AppConfig;
use travelbot::db;
use travelbot::handlers;
use travelbot::services::booking::SqliteBookingStore;
use travelbot::services::providers::{AttractionsProvider, WeatherProvider};
use travelbot::services::sessions::SessionStore;
use travelbot::state::AppState;

// ── Mock Providers ──

struct MockWeather {
    fail: bool,
}

#[async_trait]
impl WeatherProvider for MockWeather {
    async fn lookup(&self, city: &str) -> anyhow::Result<String> {
        if self.fail {
            anyhow::bail!("weather API timed out");
        }
        Ok(format!(
            "The weather in {city} is light rain with a temperature of 14°C."
        ))
    }
}

struct MockAttractions;

#[async_trait]
impl AttractionsProvider for MockAttractions {
    async fn lookup(&self, city: &str) -> anyhow::Result<Vec<String>> {
        if city == "Nowhere" {
            return Ok(vec![]);
        }
        Ok(vec![format!("1. {city} Cathedral - 📍 Old Quarter")])
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        session_ttl_minutes: 30,
        openweather_api_key: "".to_string(),
        openweather_url: "http://localhost:0".to_string(),
        attractions_provider: "canned".to_string(),
        geoapify_api_key: "".to_string(),
    }
}

fn build_state(weather_fails: bool) -> Arc<AppState> {
    let config = test_config();
    let conn = db::init_db(":memory:").unwrap();
    Arc::new(AppState {
        sessions: SessionStore::new(chrono::Duration::minutes(config.session_ttl_minutes)),
        store: Box::new(SqliteBookingStore::new(Arc::new(Mutex::new(conn)))),
        weather: Box::new(MockWeather {
            fail: weather_fails,
        }),
        attractions: Box::new(MockAttractions),
    })
}

fn test_state() -> Arc<AppState> {
    build_state(false)
}

fn test_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/chat", post(handlers::chat::chat))
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route("/api/sessions/:id", get(handlers::sessions::get_session))
        .with_state(state)
}

fn chat_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Send one message for `session` and return the response JSON.
async fn say(state: &Arc<AppState>, session: &str, message: &str) -> serde_json::Value {
    let res = test_app(state.clone())
        .oneshot(chat_request(serde_json::json!({
            "session_id": session,
            "message": message,
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await
}

async fn get_json(state: &Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let res = test_app(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    (status, body_json(res).await)
}

// ── Tests ──

#[tokio::test]
async fn test_health() {
    let state = test_state();
    let (status, json) = get_json(&state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_hotel_booking_over_http() {
    let state = test_state();

    let json = say(&state, "s1", "hotel").await;
    assert_eq!(json["state"], "awaiting_city");
    assert!(json["response"].as_str().unwrap().contains("city"));

    let json = say(&state, "s1", "Paris").await;
    assert_eq!(json["state"], "options_offered");
    let listing = json["response"].as_str().unwrap().to_string();
    assert!(listing.starts_with("Here are the hotel options in Paris:"));

    let (_, session) = get_json(&state, "/api/sessions/s1").await;
    let second_name = session["context"]["offered_options"][1]["name"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(listing.contains(&second_name));

    let json = say(&state, "s1", "2").await;
    assert_eq!(json["state"], "awaiting_confirmation");

    let json = say(&state, "s1", "yes").await;
    assert_eq!(json["state"], "awaiting_name");

    let json = say(&state, "s1", "Alice Smith").await;
    assert_eq!(json["state"], "idle");
    let confirmation = json["response"].as_str().unwrap();
    assert!(confirmation.contains("Paris"));
    assert!(confirmation.contains("Alice Smith"));
    assert!(confirmation.contains(&second_name));

    let (status, bookings) = get_json(&state, "/api/bookings").await;
    assert_eq!(status, StatusCode::OK);
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    let id = bookings[0]["id"].as_str().unwrap();
    assert!(confirmation.contains(id));
    assert_eq!(bookings[0]["kind"], "hotel");
    assert_eq!(bookings[0]["city"], "Paris");
    assert_eq!(bookings[0]["user_name"], "Alice Smith");
    assert_eq!(bookings[0]["option"]["type"], "hotel");
    assert_eq!(bookings[0]["option"]["name"], second_name.as_str());
}

#[tokio::test]
async fn test_weather_provider_failure_over_http() {
    let state = build_state(true);

    let json = say(&state, "s1", "weather in Tokyo").await;
    assert_eq!(json["state"], "idle");
    assert!(json["response"]
        .as_str()
        .unwrap()
        .starts_with("Sorry, the weather service is unavailable"));

    let (_, session) = get_json(&state, "/api/sessions/s1").await;
    assert!(session["context"]["city"].is_null());
    assert!(session["context"]["pending_action"].is_null());
}

#[tokio::test]
async fn test_attractions_reply_and_fallback() {
    let state = test_state();

    let json = say(&state, "s1", "attractions in Rome").await;
    assert_eq!(
        json["response"],
        "Top attractions in Rome:\n1. Rome Cathedral - 📍 Old Quarter"
    );

    let json = say(&state, "s1", "places in nowhere").await;
    assert!(json["response"]
        .as_str()
        .unwrap()
        .contains("1. Nowhere Old Town"));
}

#[tokio::test]
async fn test_mid_flow_cancel_over_http() {
    let state = test_state();
    for message in ["hotel", "Paris", "2"] {
        say(&state, "s1", message).await;
    }

    let json = say(&state, "s1", "no").await;
    assert_eq!(json["state"], "idle");
    assert!(json["response"].as_str().unwrap().contains("cancelled"));

    let (_, session) = get_json(&state, "/api/sessions/s1").await;
    assert_eq!(session["context"]["offered_options"], serde_json::json!([]));
    assert!(session["context"]["selected_option"].is_null());

    let (_, bookings) = get_json(&state, "/api/bookings").await;
    assert_eq!(bookings, serde_json::json!([]));
}

#[tokio::test]
async fn test_sessions_do_not_share_context() {
    let state = test_state();

    say(&state, "alice", "hotel").await;
    let json = say(&state, "bob", "Paris").await;
    // Bob never asked for anything, so "Paris" alone is not a request.
    assert_eq!(json["state"], "idle");

    let json = say(&state, "alice", "Paris").await;
    assert_eq!(json["state"], "options_offered");

    let (_, bob) = get_json(&state, "/api/sessions/bob").await;
    assert!(bob["context"]["pending_action"].is_null());
}

#[tokio::test]
async fn test_concurrent_sessions_complete_independently() {
    let state = test_state();

    let mut tasks = vec![];
    for i in 0..8 {
        let state = state.clone();
        tasks.push(tokio::spawn(async move {
            let session = format!("user-{i}");
            for message in ["flight to london", "1", "yes"] {
                say(&state, &session, message).await;
            }
            say(&state, &session, &format!("traveler {i}")).await
        }));
    }

    for task in tasks {
        let json = task.await.unwrap();
        assert_eq!(json["state"], "idle");
        assert!(json["response"]
            .as_str()
            .unwrap()
            .starts_with("Booking confirmed!"));
    }

    let (_, bookings) = get_json(&state, "/api/bookings").await;
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 8);
    assert!(bookings.iter().all(|b| b["kind"] == "flight" && b["city"] == "London"));
}

#[tokio::test]
async fn test_empty_message() {
    let state = test_state();
    let json = say(&state, "s1", "   ").await;
    assert_eq!(json["response"], "Please say something!");
    assert_eq!(json["state"], "idle");
    assert_eq!(state.sessions.len(), 0);
}

#[tokio::test]
async fn test_missing_session_id_is_generated() {
    let state = test_state();
    let res = test_app(state.clone())
        .oneshot(chat_request(serde_json::json!({ "message": "weather in Oslo" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;

    let session_id = json["session_id"].as_str().unwrap();
    assert!(!session_id.is_empty());
    assert!(json["response"].as_str().unwrap().contains("Oslo"));

    let (status, session) = get_json(&state, &format!("/api/sessions/{session_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["context"]["city"], "Oslo");
}

#[tokio::test]
async fn test_blank_session_id_rejected() {
    let state = test_state();
    let res = test_app(state)
        .oneshot(chat_request(serde_json::json!({
            "session_id": "  ",
            "message": "hotel",
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert!(json["error"].as_str().unwrap().contains("session_id"));
}

#[tokio::test]
async fn test_unknown_session_not_found() {
    let state = test_state();
    let (status, json) = get_json(&state, "/api/sessions/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("ghost"));
}
