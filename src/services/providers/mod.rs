pub mod canned;
pub mod geoapify;
pub mod openweather;

use async_trait::async_trait;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// A one-sentence weather report for `city`.
    async fn lookup(&self, city: &str) -> anyhow::Result<String>;
}

#[async_trait]
pub trait AttractionsProvider: Send + Sync {
    /// Display lines for the top attractions in `city`. May be empty.
    async fn lookup(&self, city: &str) -> anyhow::Result<Vec<String>>;
}
