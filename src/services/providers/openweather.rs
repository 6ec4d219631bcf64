use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;

use super::WeatherProvider;
use crate::services::nlu::title_case;

pub struct OpenWeatherProvider {
    api_key: String,
    url: String,
    client: reqwest::Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, url: String) -> Self {
        Self {
            api_key,
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn lookup(&self, city: &str) -> anyhow::Result<String> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .context("failed to call OpenWeather API")?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            anyhow::bail!("city '{city}' not found");
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse OpenWeather response")?;

        if !status.is_success() {
            anyhow::bail!("OpenWeather API error ({}): {}", status, data["message"]);
        }

        let temperature = data["main"]["temp"]
            .as_f64()
            .ok_or_else(|| anyhow::anyhow!("missing temperature in OpenWeather response"))?;
        let description = data["weather"][0]["description"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing description in OpenWeather response"))?;

        Ok(format!(
            "The weather in {} is {description} with a temperature of {temperature}°C.",
            title_case(city)
        ))
    }
}
