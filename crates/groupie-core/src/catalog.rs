use std::collections::HashMap;
use tracing::info;

use crate::feeds::{FeedClient, FeedError};
use crate::model::{ArtistView, Feeds, Relation};

/// Every artist joined with its side feeds, ordered by name.
///
/// Built once before the server starts accepting requests and never mutated
/// afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ArtistCatalog {
    artists: Vec<ArtistView>,
}

impl ArtistCatalog {
    /// Fetch the four feeds and join them. Any feed failure fails the whole
    /// build; there is no partial catalog.
    pub async fn load(client: &FeedClient) -> Result<Self, FeedError> {
        let feeds = client.fetch_all().await?;
        let catalog = Self::from_feeds(feeds);
        info!("catalog built with {} artists", catalog.len());
        Ok(catalog)
    }

    /// Left join of the artists feed against dates, locations and relations.
    ///
    /// Artists without a side row get empty collections. Output is sorted by
    /// name with byte-wise comparison.
    pub fn from_feeds(feeds: Feeds) -> Self {
        let Feeds {
            mut artists,
            dates,
            locations,
            relations,
        } = feeds;

        let dates_by_id: HashMap<i64, Vec<String>> =
            dates.into_iter().map(|e| (e.id, e.dates)).collect();
        let locations_by_id: HashMap<i64, Vec<String>> =
            locations.into_iter().map(|e| (e.id, e.locations)).collect();
        let relation_by_id: HashMap<i64, Relation> = relations
            .into_iter()
            .map(|e| (e.id, e.dates_locations))
            .collect();

        artists.sort_by(|a, b| a.name.cmp(&b.name));

        let artists = artists
            .into_iter()
            .map(|a| ArtistView {
                locations: locations_by_id.get(&a.id).cloned().unwrap_or_default(),
                dates: dates_by_id.get(&a.id).cloned().unwrap_or_default(),
                relation: relation_by_id.get(&a.id).cloned().unwrap_or_default(),
                id: a.id,
                name: a.name,
                image: a.image,
                members: a.members,
                creation_date: a.creation_date,
                first_album: a.first_album,
                genres: a.genres,
            })
            .collect();

        Self { artists }
    }

    pub fn artists(&self) -> &[ArtistView] {
        &self.artists
    }

    pub fn get(&self, id: i64) -> Option<&ArtistView> {
        self.artists.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}

/// Artists whose name equals `query`, ignoring case. Exact match only.
pub fn search(query: &str, artists: &[ArtistView]) -> Vec<ArtistView> {
    let query = query.to_lowercase();
    artists
        .iter()
        .filter(|a| a.name.to_lowercase() == query)
        .cloned()
        .collect()
}
