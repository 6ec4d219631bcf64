use async_trait::async_trait;

use super::AttractionsProvider;
use crate::services::catalog;

/// Offline attractions provider backed by the canned lists.
pub struct CannedAttractionsProvider;

#[async_trait]
impl AttractionsProvider for CannedAttractionsProvider {
    async fn lookup(&self, city: &str) -> anyhow::Result<Vec<String>> {
        Ok(catalog::canned_attractions(city))
    }
}
