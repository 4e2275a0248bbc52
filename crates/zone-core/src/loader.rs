//! Catalog loader: fetches the manifest and the popularity statistics.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, SortKey, ZoneRecord};
use crate::config::CatalogConfig;
use crate::error::{LoadError, ZoneError};
use crate::popularity::PopularityIndex;

const USER_AGENT: &str = concat!("zones/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client used for every catalog and zone request.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[derive(Debug, Clone)]
pub struct CatalogLoader {
    client: reqwest::Client,
    manifest_url: String,
    popularity_url: String,
}

impl CatalogLoader {
    pub fn new(client: reqwest::Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            manifest_url: config.manifest_url.clone(),
            popularity_url: config.popularity_url.clone(),
        }
    }

    /// Fetch the manifest, merge the popularity counts and run the first
    /// ordering pass. Only a manifest failure fails the load.
    pub async fn load(&self, order: SortKey) -> Result<Catalog, LoadError> {
        let records = self.fetch_manifest().await?;
        let popularity = self.fetch_popularity().await;
        let mut catalog = Catalog::new(records, popularity);
        catalog.sort_by(order);
        info!(
            "catalog loaded: {} zones, {} with popularity data, ordered by {}",
            catalog.len(),
            catalog.popularity().len(),
            order
        );
        Ok(catalog)
    }

    pub async fn fetch_manifest(&self) -> Result<Vec<ZoneRecord>, LoadError> {
        debug!("fetching manifest from {}", self.manifest_url);
        let response = self
            .client
            .get(&self.manifest_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(LoadError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(LoadError::Network)?;
        let records: Vec<ZoneRecord> = serde_json::from_str(&body)?;
        Ok(records)
    }

    /// Best effort: any failure yields an empty index.
    pub async fn fetch_popularity(&self) -> PopularityIndex {
        match self.try_fetch_popularity().await {
            Ok(index) => index,
            Err(e) => {
                warn!("popularity data unavailable, treating all zones as zero hits: {:#}", e);
                PopularityIndex::default()
            }
        }
    }

    async fn try_fetch_popularity(&self) -> anyhow::Result<PopularityIndex> {
        debug!("fetching popularity from {}", self.popularity_url);
        let response = self.client.get(&self.popularity_url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("popularity endpoint returned status: {}", response.status());
        }
        let body = response.text().await?;
        Ok(PopularityIndex::parse(&body)?)
    }
}

/// Fetch a zone document as text. Always a fresh request; nothing is cached.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, ZoneError> {
    debug!("fetching zone document {}", url);
    let response = client
        .get(url)
        .header("Accept", "text/html")
        .send()
        .await
        .map_err(ZoneError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ZoneError::Fetch {
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(ZoneError::Network)
}
