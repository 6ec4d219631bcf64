use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub session_ttl_minutes: i64,
    pub openweather_api_key: String,
    pub openweather_url: String,
    pub attractions_provider: String,
    pub geoapify_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "travelbot.db".to_string()),
            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(30),
            openweather_api_key: env::var("OPENWEATHER_API_KEY").unwrap_or_default(),
            openweather_url: env::var("OPENWEATHER_URL")
                .unwrap_or_else(|_| "http://api.openweathermap.org/data/2.5/weather".to_string()),
            attractions_provider: env::var("ATTRACTIONS_PROVIDER")
                .unwrap_or_else(|_| "canned".to_string()),
            geoapify_api_key: env::var("GEOAPIFY_API_KEY").unwrap_or_default(),
        }
    }
}
