use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Location string → ordered performance dates.
pub type Relation = BTreeMap<String, Vec<String>>;

// ── Feed records (wire format) ────────────────────────────────────────────────

/// Missing and explicit `null` fields both decode to the type's zero value, so
/// one sparse row never fails a whole feed.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null_as_default` for the relation map, where a single location may also
/// carry `null` in place of its date list.
fn null_relation<'de, D>(deserializer: D) -> Result<Relation, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<Vec<String>>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(location, dates)| (location, dates.unwrap_or_default()))
        .collect())
}

/// One entry of the artists feed, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArtist {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creation_date: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_album: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDatesEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLocationsEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRelationEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, rename = "datesLocations", deserialize_with = "null_relation")]
    pub dates_locations: Relation,
}

/// The dates/locations/relation feeds all wrap their rows in `{"index": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Index<T> {
    #[serde(
        default = "Vec::new",
        deserialize_with = "null_as_default",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub index: Vec<T>,
}

/// All four feeds, as fetched.
#[derive(Debug, Clone, Default)]
pub struct Feeds {
    pub artists: Vec<RawArtist>,
    pub dates: Vec<RawDatesEntry>,
    pub locations: Vec<RawLocationsEntry>,
    pub relations: Vec<RawRelationEntry>,
}

// ── Derived views ─────────────────────────────────────────────────────────────

/// An artist joined with its side feeds. Built once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtistView {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub members: Vec<String>,
    pub creation_date: i64,
    pub first_album: String,
    pub genres: Vec<String>,
    /// Empty when the locations feed has no row for this artist.
    pub locations: Vec<String>,
    /// Empty when the dates feed has no row for this artist.
    pub dates: Vec<String>,
    /// Empty when the relation feed has no row for this artist.
    pub relation: Relation,
}

impl ArtistView {
    /// First listed genre, or "" when the artist has none.
    pub fn first_genre(&self) -> &str {
        self.genres.first().map(String::as_str).unwrap_or("")
    }
}

/// One (artist, location, date) occurrence. Rebuilt per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConcertView {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image: String,
    pub genre: String,
    /// Raw relation key, e.g. `new_york-usa`.
    pub location: String,
    pub date: String,
}

impl ConcertView {
    pub fn place(&self) -> crate::location::Place {
        crate::location::parse_location(&self.location)
    }
}
