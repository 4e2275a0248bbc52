mod common;

use std::sync::atomic::Ordering;

use zone_core::loader::{http_client, CatalogLoader};
use zone_core::surface::{DisplaySurface, FileSurface, MemorySurface};
use zone_core::template::Endpoints;
use zone_core::view::{self, CatalogState, Gallery};
use zone_core::viewer::{render_into_new_context, Navigator, OpenOutcome, ZoneViewer};
use zone_core::{LoadError, SortKey, ZoneError, ZoneRecord};

#[derive(Default)]
struct RecordingNavigator {
    visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &str) -> anyhow::Result<()> {
        self.visited.push(url.to_string());
        Ok(())
    }
}

fn names(state: &CatalogState) -> Vec<String> {
    state
        .catalog()
        .map(|c| c.zones().iter().map(|z| z.name.clone()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn load_merges_popularity_and_pins_sentinel() {
    let cdn = common::start().await;
    let loader = CatalogLoader::new(http_client(), &cdn.catalog_config());

    let catalog = loader.load(SortKey::Popularity).await.unwrap();
    assert_eq!(catalog.hits(2), 9);
    assert_eq!(catalog.hits(-1), 0);
    assert_eq!(catalog.popularity().len(), 2);

    let mut state = CatalogState::Ready(catalog);
    assert_eq!(names(&state), vec!["Pinned", "Beta", "Alpha"]);

    state.sort_by(SortKey::Id);
    assert_eq!(names(&state), vec!["Pinned", "Alpha", "Beta"]);
    state.sort_by(SortKey::Name);
    assert_eq!(names(&state), vec!["Pinned", "Alpha", "Beta"]);
}

#[tokio::test]
async fn manifest_status_error_is_reported() {
    let cdn = common::start().await;
    cdn.knobs.manifest_status.store(404, Ordering::SeqCst);
    let loader = CatalogLoader::new(http_client(), &cdn.catalog_config());

    let err = loader.load(SortKey::Name).await.unwrap_err();
    assert!(matches!(err, LoadError::Fetch { status: 404 }));

    let state = CatalogState::Failed(err.to_string());
    let shown = view::render(&state, "", zone_core::daily::today());
    assert_eq!(
        shown.message().as_deref(),
        Some("Error loading zones: HTTP error! status: 404")
    );
}

#[tokio::test]
async fn unreachable_manifest_is_a_network_error() {
    let mut config = common::start().await.catalog_config();
    config.manifest_url = common::closed_port_url().await;
    let loader = CatalogLoader::new(http_client(), &config);

    let err = loader.load(SortKey::Name).await.unwrap_err();
    assert!(matches!(err, LoadError::Network(_)), "got {:?}", err);
    let state = CatalogState::Failed(err.to_string());
    let shown = view::render(&state, "", zone_core::daily::today());
    assert!(matches!(shown.gallery, Gallery::Failed(_)));
    assert!(shown
        .message()
        .is_some_and(|m| m.starts_with("Error loading zones: ")));
}

#[tokio::test]
async fn malformed_manifest_is_a_parse_error() {
    let cdn = common::start().await;
    cdn.knobs.manifest_body_broken.store(true, Ordering::SeqCst);
    let loader = CatalogLoader::new(http_client(), &cdn.catalog_config());

    let err = loader.load(SortKey::Name).await.unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn popularity_failure_still_loads_catalog() {
    let cdn = common::start().await;
    cdn.knobs.stats_status.store(503, Ordering::SeqCst);
    let loader = CatalogLoader::new(http_client(), &cdn.catalog_config());

    let catalog = loader.load(SortKey::Popularity).await.unwrap();
    assert!(catalog.popularity().is_empty());
    assert_eq!(catalog.len(), 3);
    // Every count reads zero, so popularity order keeps manifest order
    // behind the pinned entry.
    let order: Vec<i64> = catalog.zones().iter().map(|z| z.id).collect();
    assert_eq!(order, vec![-1, 1, 2]);
}

#[tokio::test]
async fn external_entry_navigates_without_touching_surface() {
    let cdn = common::start().await;
    let config = cdn.catalog_config();
    let mut viewer = ZoneViewer::new(Endpoints::from_config(&config), MemorySurface::new());
    let mut navigator = RecordingNavigator::default();
    let record = ZoneRecord {
        id: 50,
        name: "Elsewhere".to_string(),
        cover_template: "{COVER_URL}/50.png".to_string(),
        content_template: "https://example.com/game".to_string(),
    };

    let outcome = viewer
        .open(&http_client(), &mut navigator, &record)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        OpenOutcome::Navigated("https://example.com/game".to_string())
    );
    assert_eq!(navigator.visited, vec!["https://example.com/game"]);
    assert_eq!(viewer.surface().writes, 0);
    assert!(!viewer.is_visible());
    assert_eq!(cdn.document_hits(), 0);
}

#[tokio::test]
async fn templated_entry_is_fetched_and_replaces_previous_document() {
    let cdn = common::start().await;
    let config = cdn.catalog_config();
    let client = http_client();
    let catalog = CatalogLoader::new(client.clone(), &config)
        .load(SortKey::Id)
        .await
        .unwrap();
    let mut viewer = ZoneViewer::new(Endpoints::from_config(&config), MemorySurface::new());
    let mut navigator = RecordingNavigator::default();

    let alpha = catalog.find(1).unwrap();
    let beta = catalog.find(2).unwrap();
    viewer.open(&client, &mut navigator, alpha).await.unwrap();
    assert_eq!(viewer.labels(), Some(("Alpha", 1)));
    assert!(viewer.surface().document().unwrap().contains("zone 1"));

    let outcome = viewer.open(&client, &mut navigator, beta).await.unwrap();
    assert_eq!(outcome, OpenOutcome::Displayed);
    let document = viewer.surface().document().unwrap();
    assert!(document.contains("zone 2"));
    assert!(!document.contains("zone 1"));
    assert_eq!(viewer.labels(), Some(("Beta", 2)));
    assert!(navigator.visited.is_empty());
}

#[tokio::test]
async fn failed_zone_fetch_keeps_viewer_state() {
    let cdn = common::start().await;
    let config = cdn.catalog_config();
    let client = http_client();
    let mut viewer = ZoneViewer::new(Endpoints::from_config(&config), MemorySurface::new());
    let mut navigator = RecordingNavigator::default();

    let good = ZoneRecord {
        id: 7,
        name: "Seven".to_string(),
        cover_template: String::new(),
        content_template: "{HTML_URL}/7.html".to_string(),
    };
    let missing = ZoneRecord {
        id: 404,
        name: "Gone".to_string(),
        cover_template: String::new(),
        content_template: "{HTML_URL}/404.html".to_string(),
    };

    viewer.open(&client, &mut navigator, &good).await.unwrap();
    let err = viewer
        .open(&client, &mut navigator, &missing)
        .await
        .unwrap_err();
    assert!(matches!(err, ZoneError::Fetch { status: 404 }));
    assert_eq!(err.to_string(), "HTTP error! status: 404");
    assert_eq!(viewer.labels(), Some(("Seven", 7)));
    assert!(viewer.is_visible());
    assert!(viewer.surface().document().unwrap().contains("zone 7"));
}

#[tokio::test]
async fn new_context_fetches_again_into_fresh_surface() {
    let cdn = common::start().await;
    let config = cdn.catalog_config();
    let client = http_client();
    let dir = tempfile::tempdir().unwrap();
    let surface = FileSurface::create(dir.path()).unwrap();
    let mut viewer = ZoneViewer::new(Endpoints::from_config(&config), surface);
    let mut navigator = RecordingNavigator::default();

    let record = ZoneRecord {
        id: 3,
        name: "Three".to_string(),
        cover_template: String::new(),
        content_template: "{HTML_URL}/3.html".to_string(),
    };
    viewer.open(&client, &mut navigator, &record).await.unwrap();
    assert_eq!(cdn.document_hits(), 1);

    let url = viewer.new_context_url().unwrap();
    let fresh = FileSurface::create_fresh(dir.path()).unwrap();
    let fresh = render_into_new_context(&client, &url, fresh).await.unwrap();

    assert_eq!(cdn.document_hits(), 2);
    assert_ne!(fresh.path(), viewer.surface().path());
    let on_disk = std::fs::read_to_string(fresh.path()).unwrap();
    assert!(on_disk.contains("zone 3"));
    // Second response differs from the first, proving it was not reused.
    assert_ne!(Some(on_disk.as_str()), viewer.surface().document());
}

#[tokio::test]
async fn close_blanks_surface_and_keeps_last_zone_for_new_context() {
    let cdn = common::start().await;
    let config = cdn.catalog_config();
    let client = http_client();
    let mut viewer = ZoneViewer::new(Endpoints::from_config(&config), MemorySurface::new());
    let mut navigator = RecordingNavigator::default();
    let record = ZoneRecord {
        id: 5,
        name: "Five".to_string(),
        cover_template: String::new(),
        content_template: "{HTML_URL}/5.html".to_string(),
    };

    viewer.open(&client, &mut navigator, &record).await.unwrap();
    viewer.close().unwrap();
    assert!(!viewer.is_visible());
    assert!(viewer.surface().document().is_none());
    assert_eq!(
        viewer.new_context_url().unwrap(),
        format!("{}/html/5.html", cdn.base)
    );
}
