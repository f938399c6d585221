//! HTTP client for the four remote feeds.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::FeedsConfig;
use crate::model::{
    Feeds, Index, RawArtist, RawDatesEntry, RawLocationsEntry, RawRelationEntry,
};

#[derive(Debug, Error)]
pub enum FeedError {
    /// Resource unreachable, or the connection broke mid-body.
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status. `body` is the raw response text.
    #[error("http error fetching {url}: {status}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The payload was not the JSON shape we expect.
    #[error("decode error fetching {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fetches feed resources. No timeout and no retries are configured.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    feeds: FeedsConfig,
}

impl FeedClient {
    pub fn new(feeds: FeedsConfig) -> Self {
        Self {
            client: Client::new(),
            feeds,
        }
    }

    /// Fetch all four feeds concurrently. The first failure aborts the rest.
    pub async fn fetch_all(&self) -> Result<Feeds, FeedError> {
        let (artists, dates, locations, relations) = tokio::try_join!(
            self.artists(),
            self.dates(),
            self.locations(),
            self.relations(),
        )?;
        info!(
            "feeds fetched: {} artists, {} dates rows, {} locations rows, {} relation rows",
            artists.len(),
            dates.len(),
            locations.len(),
            relations.len()
        );
        Ok(Feeds {
            artists,
            dates,
            locations,
            relations,
        })
    }

    pub async fn artists(&self) -> Result<Vec<RawArtist>, FeedError> {
        self.fetch_json(&self.feeds.artists_url()).await
    }

    /// Single artist resource, `<artists_url>/<id>`.
    pub async fn artist(&self, id: i64) -> Result<RawArtist, FeedError> {
        let url = format!("{}/{}", self.feeds.artists_url(), id);
        self.fetch_json(&url).await
    }

    pub async fn dates(&self) -> Result<Vec<RawDatesEntry>, FeedError> {
        let idx: Index<RawDatesEntry> = self.fetch_json(&self.feeds.dates_url()).await?;
        Ok(idx.index)
    }

    pub async fn locations(&self) -> Result<Vec<RawLocationsEntry>, FeedError> {
        let idx: Index<RawLocationsEntry> = self.fetch_json(&self.feeds.locations_url()).await?;
        Ok(idx.index)
    }

    pub async fn relations(&self) -> Result<Vec<RawRelationEntry>, FeedError> {
        let idx: Index<RawRelationEntry> = self.fetch_json(&self.feeds.relation_url()).await?;
        Ok(idx.index)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FeedError> {
        debug!("GET {}", url);
        let transport = |source| FeedError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&bytes).map_err(|source| FeedError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
