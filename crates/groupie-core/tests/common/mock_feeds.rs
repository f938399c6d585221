#![allow(dead_code)]

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use groupie_core::config::FeedsConfig;
use serde_json::{json, Value};

/// How the mock answers one feed.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(StatusCode, &'static str),
    Garbage,
}

impl Reply {
    fn respond(self) -> Response {
        match self {
            Reply::Json(v) => axum::Json(v).into_response(),
            Reply::Status(code, body) => (code, body).into_response(),
            Reply::Garbage => (StatusCode::OK, "{\"index\": [oops").into_response(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockFeeds {
    pub artists: Reply,
    pub dates: Reply,
    pub locations: Reply,
    pub relation: Reply,
}

impl Default for MockFeeds {
    fn default() -> Self {
        Self {
            artists: Reply::Json(json!([
                {
                    "id": 1, "name": "B", "image": "https://img/b.jpeg",
                    "members": ["Bee"], "creationDate": 1990, "firstAlbum": "01-01-1991",
                    "genres": ["Rock"]
                },
                {
                    "id": 2, "name": "A", "image": "https://img/a.jpeg",
                    "members": ["Ay", "Aye"], "creationDate": 2001, "firstAlbum": "02-02-2002",
                    "genres": ["Jazz"]
                },
                {
                    "id": 3, "name": "C", "image": "https://img/c.jpeg",
                    "members": [], "creationDate": 2010, "firstAlbum": "03-03-2011"
                }
            ])),
            dates: Reply::Json(json!({"index": [
                {"id": 1, "dates": ["*2024-05-01"]},
                {"id": 2, "dates": ["*2024-01-01"]}
            ]})),
            locations: Reply::Json(json!({"index": [
                {"id": 1, "locations": ["city-usa"], "dates": "https://api/dates/1"},
                {"id": 2, "locations": ["city-fr"], "dates": "https://api/dates/2"}
            ]})),
            relation: Reply::Json(json!({"index": [
                {"id": 1, "datesLocations": {"city-usa": ["2024-05-01"]}},
                {"id": 2, "datesLocations": {"city-fr": ["2024-01-01"]}}
            ]})),
        }
    }
}

impl MockFeeds {
    /// Serve on an ephemeral loopback port and return the matching feed config.
    pub async fn serve(self) -> FeedsConfig {
        let artists = self.artists.clone();
        let single = self.artists.clone();
        let dates = self.dates;
        let locations = self.locations;
        let relation = self.relation;

        let app = Router::new()
            .route("/api/artists", get(move || fixed(artists.clone())))
            .route(
                "/api/artists/:id",
                get(move |Path(id): Path<i64>| {
                    let reply = single.clone();
                    async move { single_artist(reply, id) }
                }),
            )
            .route("/api/dates", get(move || fixed(dates.clone())))
            .route("/api/locations", get(move || fixed(locations.clone())))
            .route("/api/relation", get(move || fixed(relation.clone())));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock feed server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        FeedsConfig {
            base_url: format!("http://{}/api", addr),
        }
    }
}

async fn fixed(reply: Reply) -> Response {
    reply.respond()
}

fn single_artist(reply: Reply, id: i64) -> Response {
    match reply {
        Reply::Json(Value::Array(items)) => items
            .into_iter()
            .find(|a| a["id"].as_i64() == Some(id))
            .map(|a| axum::Json(a).into_response())
            .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response()),
        other => other.respond(),
    }
}
