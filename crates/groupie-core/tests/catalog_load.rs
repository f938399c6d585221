mod common;

use axum::http::StatusCode;
use common::mock_feeds::{MockFeeds, Reply};
use groupie_core::catalog::ArtistCatalog;
use groupie_core::concerts::{sort_concerts, SortOrder};
use groupie_core::feeds::{FeedClient, FeedError};
use serde_json::json;

#[tokio::test]
async fn catalog_loads_and_joins_all_feeds() {
    let feeds = MockFeeds::default().serve().await;
    let client = FeedClient::new(feeds);

    let catalog = ArtistCatalog::load(&client)
        .await
        .expect("catalog should load from mock feeds");

    let names: Vec<&str> = catalog.artists().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    let a = catalog.get(2).expect("artist 2 present");
    assert_eq!(a.members, vec!["Ay", "Aye"]);
    assert_eq!(a.creation_date, 2001);
    assert_eq!(a.locations, vec!["city-fr"]);
    assert_eq!(a.dates, vec!["*2024-01-01"]);
    assert_eq!(a.relation["city-fr"], vec!["2024-01-01"]);

    // C has no side rows and no genres
    let c = catalog.get(3).expect("artist 3 present");
    assert!(c.locations.is_empty());
    assert!(c.dates.is_empty());
    assert!(c.relation.is_empty());
    assert!(c.genres.is_empty());
}

#[tokio::test]
async fn loaded_catalog_sorts_end_to_end() {
    let client = FeedClient::new(MockFeeds::default().serve().await);
    let catalog = ArtistCatalog::load(&client).await.unwrap();

    let by_date = sort_concerts(catalog.artists(), SortOrder::Date);
    let got: Vec<(&str, &str)> = by_date
        .iter()
        .map(|c| (c.artist_name.as_str(), c.date.as_str()))
        .collect();
    assert_eq!(got, vec![("A", "2024-01-01"), ("B", "2024-05-01")]);

    let by_name = sort_concerts(catalog.artists(), SortOrder::Name);
    assert_eq!(by_name[0].artist_name, "A");
    assert_eq!(by_name[0].genre, "Jazz");
    assert_eq!(by_name[1].artist_name, "B");
}

#[tokio::test]
async fn status_failure_on_any_feed_fails_the_build() {
    let feeds = MockFeeds {
        locations: Reply::Status(StatusCode::INTERNAL_SERVER_ERROR, "locations exploded"),
        ..MockFeeds::default()
    }
    .serve()
    .await;
    let client = FeedClient::new(feeds);

    match ArtistCatalog::load(&client).await {
        Err(FeedError::Status { url, status, body }) => {
            assert!(url.ends_with("/api/locations"), "unexpected url {url}");
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR.as_u16());
            assert_eq!(body, "locations exploded");
        }
        other => panic!("expected status error, got {:?}", other.map(|c| c.len())),
    }
}

#[tokio::test]
async fn malformed_payload_is_decode_error() {
    let feeds = MockFeeds {
        relation: Reply::Garbage,
        ..MockFeeds::default()
    }
    .serve()
    .await;
    let client = FeedClient::new(feeds);

    match ArtistCatalog::load(&client).await {
        Err(FeedError::Decode { url, .. }) => assert!(url.ends_with("/api/relation")),
        other => panic!("expected decode error, got {:?}", other.map(|c| c.len())),
    }
}

#[tokio::test]
async fn wrong_shape_is_decode_error() {
    let feeds = MockFeeds {
        dates: Reply::Json(json!([{"id": 1, "dates": []}])),
        ..MockFeeds::default()
    }
    .serve()
    .await;
    let client = FeedClient::new(feeds);

    assert!(matches!(
        ArtistCatalog::load(&client).await,
        Err(FeedError::Decode { .. })
    ));
}

#[tokio::test]
async fn null_fields_in_feeds_still_load() {
    let feeds = MockFeeds {
        artists: Reply::Json(json!([
            {"id": 1, "name": "B", "genres": null, "members": null},
            {"id": 2, "name": null}
        ])),
        relation: Reply::Json(json!({"index": [
            {"id": 1, "datesLocations": null},
            {"id": 2, "datesLocations": {"city-fr": null}}
        ]})),
        ..MockFeeds::default()
    }
    .serve()
    .await;
    let client = FeedClient::new(feeds);

    let catalog = ArtistCatalog::load(&client)
        .await
        .expect("null fields are empty values, not decode errors");
    assert_eq!(catalog.len(), 2);
    let b = catalog.get(1).expect("artist 1 present");
    assert!(b.genres.is_empty());
    assert!(b.relation.is_empty());
    assert_eq!(catalog.get(2).map(|a| a.name.as_str()), Some(""));
}

#[tokio::test]
async fn single_artist_fetch() {
    let client = FeedClient::new(MockFeeds::default().serve().await);

    let b = client.artist(1).await.expect("artist 1 exists");
    assert_eq!(b.name, "B");
    assert_eq!(b.genres, vec!["Rock"]);

    match client.artist(42).await {
        Err(FeedError::Status { status, .. }) => {
            assert_eq!(status, StatusCode::NOT_FOUND.as_u16())
        }
        other => panic!("expected 404, got {:?}", other),
    }
}
