//! Local HTTP API. Read-only views of the catalog, a way to ask the running
//! app to open a zone, and the current display-surface document.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, RwLock};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use zone_core::template::{ContentTarget, Endpoints};
use zone_core::view::{self, CatalogState, Gallery};
use zone_core::{SortKey, ZoneRecord};

/// Catalog shared between the event loop (writer) and the API (reader).
pub type SharedCatalog = Arc<RwLock<CatalogState>>;

/// Requests the API forwards to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    Open(i64),
}

#[derive(Clone)]
pub struct HttpState {
    pub catalog: SharedCatalog,
    pub endpoints: Endpoints,
    /// File backing the display surface.
    pub surface_path: PathBuf,
    pub command_tx: mpsc::Sender<ApiCommand>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub id: i64,
    pub name: String,
    pub hits: u64,
    pub cover_url: String,
    pub content_url: String,
    pub external: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ZonesResponse {
    pub total: usize,
    pub sort: SortKey,
    pub zone_of_the_day: Option<ZoneInfo>,
    pub zones: Vec<ZoneInfo>,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

#[derive(Debug, Deserialize)]
pub struct ZonesQuery {
    #[serde(default)]
    q: String,
    sort: Option<String>,
}

fn zone_info(state: &HttpState, catalog: &zone_core::Catalog, zone: &ZoneRecord) -> ZoneInfo {
    let (content_url, external) = match state.endpoints.content_target(zone) {
        ContentTarget::External(url) => (url, true),
        ContentTarget::Embedded(url) => (url, false),
    };
    ZoneInfo {
        id: zone.id,
        name: zone.name.clone(),
        hits: catalog.hits(zone.id),
        cover_url: state.endpoints.cover_url(zone),
        content_url,
        external,
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ApiError { error: msg.into() })).into_response()
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/api/zones", get(list_zones))
        .route("/api/zones/:id", get(get_zone))
        .route("/api/open/:id", get(open_zone).post(open_zone))
        .route("/zone", get(surface_document))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn start_server(bind_address: String, port: u16, state: HttpState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let addr = format!("{}:{}", bind_address, port);
        let listener = match TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to bind HTTP server to {}: {}", addr, e);
                return;
            }
        };
        info!("HTTP API listening on http://{}", addr);

        if let Err(e) = axum::serve(listener, router(state)).await {
            error!("HTTP server error: {}", e);
        }
    })
}

async fn list_zones(State(state): State<HttpState>, Query(params): Query<ZonesQuery>) -> Response {
    let guard = state.catalog.read().await;
    let catalog = match &*guard {
        CatalogState::Loading => return api_error(StatusCode::SERVICE_UNAVAILABLE, "Loading zones…"),
        CatalogState::Failed(reason) => {
            return api_error(
                StatusCode::BAD_GATEWAY,
                format!("Error loading zones: {}", reason),
            )
        }
        CatalogState::Ready(catalog) => catalog,
    };

    // A different order is computed on a copy; the app's order is untouched.
    let sort = match params.sort.as_deref() {
        None => catalog.sort_key().unwrap_or_default(),
        Some(label) => match label.parse::<SortKey>() {
            Ok(key) => key,
            Err(e) => return api_error(StatusCode::BAD_REQUEST, e),
        },
    };
    let reordered;
    let state_view = if catalog.sort_key() == Some(sort) {
        &*guard
    } else {
        let mut copy = catalog.clone();
        copy.sort_by(sort);
        reordered = CatalogState::Ready(copy);
        &reordered
    };
    let Some(ordered) = state_view.catalog() else {
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable");
    };

    let rendered = view::render(state_view, &params.q, zone_core::daily::today());
    let zones: Vec<ZoneInfo> = match &rendered.gallery {
        Gallery::Zones(zones) => zones.iter().map(|z| zone_info(&state, ordered, z)).collect(),
        _ => Vec::new(),
    };
    Json(ZonesResponse {
        total: zones.len(),
        sort,
        zone_of_the_day: rendered
            .zone_of_the_day
            .map(|z| zone_info(&state, ordered, z)),
        zones,
    })
    .into_response()
}

async fn get_zone(State(state): State<HttpState>, Path(id): Path<i64>) -> Response {
    let guard = state.catalog.read().await;
    let Some(catalog) = guard.catalog() else {
        return api_error(StatusCode::SERVICE_UNAVAILABLE, "catalog not loaded");
    };
    match catalog.find(id) {
        Some(zone) => Json(zone_info(&state, catalog, zone)).into_response(),
        None => api_error(StatusCode::NOT_FOUND, format!("no zone with id {}", id)),
    }
}

async fn open_zone(State(state): State<HttpState>, Path(id): Path<i64>) -> Response {
    let known = state.catalog.read().await.find(id).is_some();
    if !known {
        return api_error(StatusCode::NOT_FOUND, format!("no zone with id {}", id));
    }
    info!("HTTP API: open zone {}", id);
    if state.command_tx.send(ApiCommand::Open(id)).await.is_err() {
        error!("Failed to forward open request for zone {}", id);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    StatusCode::ACCEPTED.into_response()
}

async fn surface_document(State(state): State<HttpState>) -> Response {
    match tokio::fs::read_to_string(&state.surface_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!("surface document unreadable at {}: {}", state.surface_path.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
