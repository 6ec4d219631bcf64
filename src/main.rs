use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use travelbot::config::AppConfig;
use travelbot::db;
use travelbot::handlers;
use travelbot::services::booking::SqliteBookingStore;
use travelbot::services::providers::canned::CannedAttractionsProvider;
use travelbot::services::providers::geoapify::GeoapifyAttractionsProvider;
use travelbot::services::providers::openweather::OpenWeatherProvider;
use travelbot::services::providers::AttractionsProvider;
use travelbot::services::sessions::SessionStore;
use travelbot::state::AppState;

const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    if config.openweather_api_key.is_empty() {
        tracing::warn!("OPENWEATHER_API_KEY not set, weather lookups will fail");
    }
    let weather = OpenWeatherProvider::new(
        config.openweather_api_key.clone(),
        config.openweather_url.clone(),
    );

    let attractions: Box<dyn AttractionsProvider> = match config.attractions_provider.as_str() {
        "geoapify" => {
            anyhow::ensure!(
                !config.geoapify_api_key.is_empty(),
                "GEOAPIFY_API_KEY must be set when ATTRACTIONS_PROVIDER=geoapify"
            );
            tracing::info!("using Geoapify attractions provider");
            Box::new(GeoapifyAttractionsProvider::new(config.geoapify_api_key.clone()))
        }
        _ => {
            tracing::info!("using canned attractions provider");
            Box::new(CannedAttractionsProvider)
        }
    };

    let state = Arc::new(AppState {
        sessions: SessionStore::new(chrono::Duration::minutes(config.session_ttl_minutes)),
        store: Box::new(SqliteBookingStore::new(Arc::new(Mutex::new(conn)))),
        weather: Box::new(weather),
        attractions,
    });

    let eviction_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(EVICTION_INTERVAL);
        loop {
            interval.tick().await;
            eviction_state.sessions.evict_idle();
        }
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/chat", post(handlers::chat::chat))
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route("/api/sessions/:id", get(handlers::sessions::get_session))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
