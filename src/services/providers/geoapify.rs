use anyhow::Context;
use async_trait::async_trait;

use super::AttractionsProvider;

const GEOCODE_URL: &str = "https://api.geoapify.com/v1/geocode/search";
const PLACES_URL: &str = "https://api.geoapify.com/v2/places";
const SEARCH_RADIUS_METERS: u32 = 10_000;
const MAX_PLACES: u32 = 5;

pub struct GeoapifyAttractionsProvider {
    api_key: String,
    client: reqwest::Client,
}

impl GeoapifyAttractionsProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> anyhow::Result<serde_json::Value> {
        self.client
            .get(url)
            .query(query)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .context("failed to call Geoapify API")?
            .error_for_status()
            .context("Geoapify API returned error")?
            .json::<serde_json::Value>()
            .await
            .context("failed to parse Geoapify response")
    }
}

#[async_trait]
impl AttractionsProvider for GeoapifyAttractionsProvider {
    async fn lookup(&self, city: &str) -> anyhow::Result<Vec<String>> {
        let geo = self
            .get_json(GEOCODE_URL, &[("text", city.to_string())])
            .await?;

        let Some(coords) = geo["features"][0]["geometry"]["coordinates"].as_array() else {
            tracing::info!(city, "geoapify found no location");
            return Ok(vec![]);
        };
        let (Some(lon), Some(lat)) = (
            coords.first().and_then(|v| v.as_f64()),
            coords.get(1).and_then(|v| v.as_f64()),
        ) else {
            anyhow::bail!("malformed coordinates in Geoapify response");
        };

        let places = self
            .get_json(
                PLACES_URL,
                &[
                    ("categories", "tourism.sights".to_string()),
                    ("filter", format!("circle:{lon},{lat},{SEARCH_RADIUS_METERS}")),
                    ("limit", MAX_PLACES.to_string()),
                ],
            )
            .await?;

        let lines = places["features"]
            .as_array()
            .map(|features| {
                features
                    .iter()
                    .enumerate()
                    .map(|(i, place)| {
                        let props = &place["properties"];
                        let name = props["name"].as_str().unwrap_or("Unknown Place");
                        let address = props["address_line2"]
                            .as_str()
                            .unwrap_or("No address available");
                        format!("{}. {name} - {address}", i + 1)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(lines)
    }
}
