//! Concert flattening and the four listing sorts.

use serde::{Deserialize, Serialize};

use crate::dates::DateKey;
use crate::model::{ArtistView, ConcertView};

/// Expand each artist's relation into one record per (location, date).
///
/// Relation maps iterate in key order, so the output is grouped per artist
/// and ordered by location key within an artist. Only the sorts below give an
/// ordering contract.
pub fn flatten(artists: &[ArtistView]) -> Vec<ConcertView> {
    let total = artists
        .iter()
        .flat_map(|a| a.relation.values())
        .map(Vec::len)
        .sum();
    let mut out = Vec::with_capacity(total);

    for artist in artists {
        let genre = artist.first_genre();
        for (location, dates) in &artist.relation {
            for date in dates {
                out.push(ConcertView {
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image: artist.image.clone(),
                    genre: genre.to_string(),
                    location: location.clone(),
                    date: date.clone(),
                });
            }
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Location, then date, then artist name.
    City,
    /// Date, then location, then artist name.
    Date,
    /// First genre, then date, then artist name.
    Genre,
    /// Artist name only.
    Name,
}

impl SortOrder {
    /// Map a `sort=` query value. Unknown values mean "no sort".
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "ville" | "city" => Some(SortOrder::City),
            "date" => Some(SortOrder::Date),
            "genre" => Some(SortOrder::Genre),
            "nom" | "name" => Some(SortOrder::Name),
            _ => None,
        }
    }
}

/// Flatten `artists` and stable-sort the concerts by `order`.
pub fn sort_concerts(artists: &[ArtistView], order: SortOrder) -> Vec<ConcertView> {
    let mut concerts = flatten(artists);
    // sort_by_cached_key is stable and parses each date once
    match order {
        SortOrder::City => concerts.sort_by_cached_key(|c| {
            (normalize(&c.location), DateKey::new(&c.date), c.artist_name.to_lowercase())
        }),
        SortOrder::Date => concerts.sort_by_cached_key(|c| {
            (DateKey::new(&c.date), normalize(&c.location), c.artist_name.to_lowercase())
        }),
        SortOrder::Genre => concerts.sort_by_cached_key(|c| {
            (normalize(&c.genre), DateKey::new(&c.date), c.artist_name.to_lowercase())
        }),
        SortOrder::Name => concerts.sort_by_cached_key(|c| c.artist_name.to_lowercase()),
    }
    concerts
}

/// Trimmed and lower-cased, for city and genre comparisons.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
