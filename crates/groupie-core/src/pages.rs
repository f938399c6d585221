//! Page structures handed to the presentation layer.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::catalog::{search, ArtistCatalog};
use crate::concerts::{sort_concerts, SortOrder};
use crate::location::{parse_location, Place};
use crate::model::{ArtistView, ConcertView, RawArtist, Relation};

/// The artist listing.
///
/// `concerts` is only present when a sort was requested; without one the
/// presentation falls back to the per-artist `artists` list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexPage {
    pub artists: Vec<ArtistView>,
    pub concerts: Option<Vec<ConcertView>>,
    pub cities: Option<Vec<String>>,
}

impl IndexPage {
    /// Artists only, no concerts and no city list.
    pub fn artists_only(artists: Vec<ArtistView>) -> Self {
        Self {
            artists,
            ..Default::default()
        }
    }

    /// Listing with city list, optional search, then optional sort.
    ///
    /// A non-empty `query` replaces the page with a fresh artist-only result,
    /// dropping the city list. The sort runs afterwards, over whatever artists
    /// the page holds at that point.
    pub fn build(catalog: &ArtistCatalog, query: Option<&str>, sort: Option<SortOrder>) -> Self {
        let mut page = Self {
            artists: catalog.artists().to_vec(),
            concerts: None,
            cities: Some(cities(catalog.artists())),
        };

        if let Some(q) = query.filter(|q| !q.is_empty()) {
            page = Self::artists_only(search(q, &page.artists));
        }

        if let Some(order) = sort {
            page.concerts = Some(sort_concerts(&page.artists, order));
        }

        page
    }
}

/// Distinct non-empty location strings from every artist's `locations` and
/// relation keys, sorted.
pub fn cities(artists: &[ArtistView]) -> Vec<String> {
    artists
        .iter()
        .flat_map(|a| a.locations.iter().chain(a.relation.keys()))
        .filter(|loc| !loc.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One tour stop on the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub location: String,
    pub place: Place,
    pub dates: Vec<String>,
}

/// The artist detail page. `Default` is the zero-valued page rendered when
/// nothing could be found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtistPage {
    pub artist_name: String,
    pub artist_image: String,
    pub members: Vec<String>,
    pub creation_date: i64,
    pub first_album: String,
    pub genres: Vec<String>,
    pub locations: Vec<String>,
    pub dates: Vec<String>,
    pub relation: Relation,
    pub stops: Vec<Stop>,
}

impl From<&ArtistView> for ArtistPage {
    fn from(a: &ArtistView) -> Self {
        let stops = a
            .relation
            .iter()
            .map(|(location, dates)| Stop {
                location: location.clone(),
                place: parse_location(location),
                dates: dates.clone(),
            })
            .collect();

        Self {
            artist_name: a.name.clone(),
            artist_image: a.image.clone(),
            members: a.members.clone(),
            creation_date: a.creation_date,
            first_album: a.first_album.clone(),
            genres: a.genres.clone(),
            locations: a.locations.clone(),
            dates: a.dates.clone(),
            relation: a.relation.clone(),
            stops,
        }
    }
}

/// Fallback path: the artist resource alone carries no tour data, so
/// locations, dates, relation and stops stay empty.
impl From<RawArtist> for ArtistPage {
    fn from(a: RawArtist) -> Self {
        Self {
            artist_name: a.name,
            artist_image: a.image,
            members: a.members,
            creation_date: a.creation_date,
            first_album: a.first_album,
            genres: a.genres,
            ..Default::default()
        }
    }
}
