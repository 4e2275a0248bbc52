#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;
use zone_core::config::CatalogConfig;

pub const MANIFEST: &str = r#"[
    {"id": 1, "name": "Alpha", "cover": "{COVER_URL}/1.png", "url": "{HTML_URL}/1.html"},
    {"id": -1, "name": "Pinned", "cover": "{COVER_URL}/-1.png", "url": "https://example.com/request"},
    {"id": 2, "name": "Beta", "cover": "{COVER_URL}/2.png", "url": "{HTML_URL}/2.html"}
]"#;

pub const STATS: &str = r#"[
    {"name": "/1.html", "hits": {"total": 5}},
    {"name": "/2.html", "hits": {"total": 9}},
    {"name": "/index.html", "hits": {"total": 900}}
]"#;

/// Knobs the tests flip to make individual routes misbehave.
#[derive(Default)]
pub struct Knobs {
    /// Non-zero: the manifest route answers with this status.
    pub manifest_status: AtomicU16,
    /// Non-zero: the stats route answers with this status.
    pub stats_status: AtomicU16,
    pub manifest_body_broken: std::sync::atomic::AtomicBool,
    /// Requests served by the zone document route.
    pub document_hits: AtomicUsize,
}

pub struct MockCdn {
    pub base: String,
    pub knobs: Arc<Knobs>,
}

impl MockCdn {
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            manifest_url: format!("{}/zones.json", self.base),
            popularity_url: format!("{}/stats", self.base),
            cover_base: format!("{}/covers", self.base),
            html_base: format!("{}/html", self.base),
            ..CatalogConfig::default()
        }
    }

    pub fn document_hits(&self) -> usize {
        self.knobs.document_hits.load(Ordering::SeqCst)
    }
}

fn forced_status(slot: &AtomicU16) -> Option<StatusCode> {
    match slot.load(Ordering::SeqCst) {
        0 => None,
        code => StatusCode::from_u16(code).ok(),
    }
}

async fn manifest(State(knobs): State<Arc<Knobs>>) -> Response {
    if let Some(status) = forced_status(&knobs.manifest_status) {
        return status.into_response();
    }
    if knobs.manifest_body_broken.load(Ordering::SeqCst) {
        return "<html>not json</html>".into_response();
    }
    MANIFEST.into_response()
}

async fn stats(State(knobs): State<Arc<Knobs>>) -> Response {
    if let Some(status) = forced_status(&knobs.stats_status) {
        return status.into_response();
    }
    STATS.into_response()
}

async fn document(State(knobs): State<Arc<Knobs>>, Path(file): Path<String>) -> Response {
    let n = knobs.document_hits.fetch_add(1, Ordering::SeqCst) + 1;
    match file.strip_suffix(".html") {
        Some(id) if id != "404" => Html(format!("<h1>zone {}</h1><!-- {} -->", id, n)).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn start() -> MockCdn {
    let knobs = Arc::new(Knobs::default());
    let app = Router::new()
        .route("/zones.json", get(manifest))
        .route("/stats", get(stats))
        .route("/html/:file", get(document))
        .with_state(knobs.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockCdn {
        base: format!("http://{}", addr),
        knobs,
    }
}

/// An address nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/zones.json", addr)
}
