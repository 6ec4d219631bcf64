use crate::services::booking::BookingStore;
use crate::services::providers::{AttractionsProvider, WeatherProvider};
use crate::services::sessions::SessionStore;

pub struct AppState {
    pub sessions: SessionStore,
    pub store: Box<dyn BookingStore>,
    pub weather: Box<dyn WeatherProvider>,
    pub attractions: Box<dyn AttractionsProvider>,
}
