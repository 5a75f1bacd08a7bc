//! HTTP server - the blog JSON API plus the static front-end

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::content::PostRepository;
use crate::search::{SearchEngine, SearchOptions};
use crate::Folio;

mod sitemap;

/// Shared request state
pub struct AppState {
    pub repo: PostRepository,
    pub search: SearchEngine,
    pub site_url: String,
}

/// Error surface of the API handlers.
///
/// Validation problems become 400s; anything unexpected is logged and
/// collapsed into a generic 500 so a broken request never takes the page
/// down with a stack trace.
pub enum ApiError {
    BadRequest(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal(e) => {
                tracing::error!("request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to process request" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<std::fmt::Error> for ApiError {
    fn from(e: std::fmt::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

/// Start the site server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let repo = folio.repository();
    let state = Arc::new(AppState {
        search: SearchEngine::new(repo.clone()),
        repo,
        site_url: folio.config.url.clone(),
    });

    let app = router(state)
        .fallback_service(ServeDir::new(&folio.static_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http());

    // Handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/blog/posts", get(list_posts))
        .route("/api/blog/posts/:slug", get(show_post))
        .route("/api/blog/featured", get(list_featured))
        .route("/api/blog/tags", get(list_tags))
        .route("/api/blog/search", get(search))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .with_state(state)
}

async fn list_posts(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let posts = state.repo.get_all_metadata().await;
    Json(json!({ "posts": posts }))
}

async fn show_post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    match state.repo.get_post(&slug).await {
        Some(post) => Json(json!({ "post": post })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Post not found" })),
        )
            .into_response(),
    }
}

async fn list_featured(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let posts = state.repo.get_featured().await;
    Json(json!({ "posts": posts }))
}

async fn list_tags(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let tags = state.repo.get_all_tags().await;
    Json(json!({ "tags": tags }))
}

/// Flat query parameters as they arrive on the wire.
#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    q: Option<String>,
    tags: Option<String>,
    featured: Option<String>,
    #[serde(rename = "dateFrom")]
    date_from: Option<String>,
    #[serde(rename = "dateTo")]
    date_to: Option<String>,
}

/// Which search path a request dispatches to.
#[derive(Debug, PartialEq)]
enum SearchRequest {
    Simple(String),
    Advanced(SearchOptions),
}

/// A text query alone is a simple search; any structured parameter switches
/// to advanced search with whatever was supplied. Empty-string parameters
/// count as absent.
fn dispatch(params: SearchParams) -> SearchRequest {
    let present = |value: Option<String>| value.filter(|s| !s.is_empty());

    let q = present(params.q);
    let tags = present(params.tags);
    let featured = present(params.featured);
    let date_from = present(params.date_from);
    let date_to = present(params.date_to);

    if let Some(query) = &q {
        if tags.is_none() && featured.is_none() && date_from.is_none() && date_to.is_none() {
            return SearchRequest::Simple(query.clone());
        }
    }

    SearchRequest::Advanced(SearchOptions {
        query: q,
        tags: tags.map(|t| t.split(',').map(str::to_string).collect()),
        featured: featured.map(|f| f == "true"),
        date_from,
        date_to,
    })
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let posts = match dispatch(params) {
        SearchRequest::Simple(query) => state.search.search(&query).await,
        SearchRequest::Advanced(options) => state
            .search
            .advanced_search(&options)
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
    };
    Ok(Json(json!({ "posts": posts })))
}
