use anyhow::Context;
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Form, Router,
};
use groupie_core::catalog::ArtistCatalog;
use groupie_core::concerts::SortOrder;
use groupie_core::config::AssetsConfig;
use groupie_core::feeds::FeedClient;
use groupie_core::pages::{ArtistPage, IndexPage};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Shared by every handler. The catalog is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ArtistCatalog>,
    pub client: FeedClient,
    pub assets: AssetsConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ListingParams {
    sort: Option<String>,
    recherche: Option<String>,
}

impl ListingParams {
    fn order(&self) -> Option<SortOrder> {
        self.sort.as_deref().and_then(SortOrder::from_param)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchForm {
    recherche: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DetailParams {
    id: Option<String>,
}

impl DetailParams {
    /// Missing, malformed or non-positive ids fall back to artist 1.
    fn artist_id(&self) -> i64 {
        self.id
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|id| *id >= 1)
            .unwrap_or(1)
    }
}

pub fn build_router(state: AppState) -> Router {
    let css = ServeDir::new(state.assets.css_dir());
    let images = ServeDir::new(state.assets.images_dir());

    Router::new()
        .route("/", get(listing).post(search_listing))
        .route("/artist", get(artist_detail))
        .route("/index2", get(artist_detail))
        .route("/contact", get(artists_only))
        .route("/panier", get(artists_only))
        .nest_service("/CSS", css)
        .nest_service("/images", images)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(
    addr: &str,
    state: AppState,
) -> anyhow::Result<tokio::task::JoinHandle<()>> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP server to {}", addr))?;
    let app = build_router(state);

    info!("HTTP server listening on http://{}", addr);

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    }))
}

async fn listing(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Json<IndexPage> {
    Json(IndexPage::build(&state.catalog, None, params.order()))
}

async fn search_listing(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
    form: Option<Form<SearchForm>>,
) -> Json<IndexPage> {
    // A urlencoded body field wins over the query string. Any other body
    // (empty, multipart, missing content type) leaves only the query string.
    let query = form
        .and_then(|Form(f)| f.recherche)
        .or(params.recherche.clone());
    let query = query.as_deref();
    info!("search: {:?}", query);
    Json(IndexPage::build(&state.catalog, query, params.order()))
}

async fn artist_detail(
    State(state): State<AppState>,
    Query(params): Query<DetailParams>,
) -> Json<ArtistPage> {
    let id = params.artist_id();

    if let Some(view) = state.catalog.get(id) {
        return Json(ArtistPage::from(view));
    }

    // Not preloaded: fetch the bare artist resource. Tour data is not fetched
    // on this path, and a failed fetch renders an empty page.
    match state.client.artist(id).await {
        Ok(artist) => Json(ArtistPage::from(artist)),
        Err(e) => {
            debug!("artist {} fallback fetch failed: {}", id, e);
            Json(ArtistPage::default())
        }
    }
}

async fn artists_only(State(state): State<AppState>) -> Json<IndexPage> {
    Json(IndexPage::artists_only(state.catalog.artists().to_vec()))
}
