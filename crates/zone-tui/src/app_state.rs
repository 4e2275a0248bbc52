//! AppState — shared read-only data passed to all components.
//!
//! Only the App event loop writes to it.

use std::path::PathBuf;

use chrono::NaiveDate;
use zone_core::template::Endpoints;
use zone_core::view::{self, CatalogState, GalleryView};
use zone_core::SortKey;

use crate::widgets::status_bar::InputMode;

/// Snapshot of the zone viewer, refreshed after every open/close.
#[derive(Debug, Clone, Default)]
pub struct ViewerInfo {
    pub visible: bool,
    pub name: Option<String>,
    pub id: Option<i64>,
    pub document: Option<String>,
    /// `file://` address of the display surface.
    pub location: Option<String>,
    /// Name of the zone whose document is still being fetched.
    pub pending: Option<String>,
}

pub struct AppState {
    // ── Catalog ─────────────────────────────────────────────────────────────
    pub catalog: CatalogState,
    pub sort_key: SortKey,
    pub endpoints: Endpoints,
    /// Local calendar date, refreshed by the wake ticker.
    pub today: NaiveDate,
    pub query: String,

    // ── Viewer ──────────────────────────────────────────────────────────────
    pub viewer: ViewerInfo,
    pub maximized: bool,
    /// Address the local HTTP server serves the surface at, if it runs.
    pub served_at: Option<String>,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub input_mode: InputMode,

    // ── Logs ────────────────────────────────────────────────────────────────
    /// WARN/ERROR lines from zones.log (refreshed periodically by App).
    pub log_lines: Vec<String>,
    pub log_path: PathBuf,
}

impl AppState {
    pub fn new(sort_key: SortKey, endpoints: Endpoints, log_path: PathBuf) -> Self {
        Self {
            catalog: CatalogState::Loading,
            sort_key,
            endpoints,
            today: zone_core::daily::today(),
            query: String::new(),
            viewer: ViewerInfo::default(),
            maximized: false,
            served_at: None,
            input_mode: InputMode::Normal,
            log_lines: Vec::new(),
            log_path,
        }
    }

    /// The gallery for the current catalog, query and date.
    pub fn gallery(&self) -> GalleryView<'_> {
        view::render(&self.catalog, &self.query, self.today)
    }

    pub fn hits(&self, id: i64) -> Option<u64> {
        let catalog = self.catalog.catalog()?;
        if catalog.popularity().is_empty() {
            None
        } else {
            Some(catalog.hits(id))
        }
    }
}
