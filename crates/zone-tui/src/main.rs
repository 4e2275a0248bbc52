mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod http;
mod theme;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::{mpsc, RwLock};

use zone_core::config::Config;
use zone_core::surface::FileSurface;
use zone_core::template::Endpoints;
use zone_core::view::CatalogState;
use zone_core::SortKey;

/// Terminal gallery for the zones catalog.
#[derive(Parser, Debug)]
#[command(name = "zones", version, about)]
struct Args {
    /// Open this zone as soon as the catalog has loaded.
    #[arg(long)]
    id: Option<i64>,

    /// Initial ordering: name, id or popularity.
    #[arg(long)]
    sort: Option<SortKey>,

    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not start the local HTTP API.
    #[arg(long)]
    no_http: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = zone_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("zones.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("zones log: {}", log_path.display());

    tracing::info!("zones starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("config unreadable, using defaults: {:#}", e);
            Config::default()
        }),
    };
    let sort_key = args.sort.unwrap_or(config.catalog.default_sort);

    // ── Display surface ──────────────────────────────────────────────────────
    let surface = FileSurface::create(&config.paths.surface_dir).with_context(|| {
        format!(
            "creating display surface in {}",
            config.paths.surface_dir.display()
        )
    })?;
    tracing::info!("display surface at {}", surface.path().display());

    // ── HTTP server ──────────────────────────────────────────────────────────
    let shared_catalog = Arc::new(RwLock::new(CatalogState::Loading));
    let (api_tx, api_rx) = mpsc::channel::<http::ApiCommand>(64);
    let mut served_at = None;
    if config.http.enabled && !args.no_http {
        http::start_server(
            config.http.bind_address.clone(),
            config.http.port,
            http::HttpState {
                catalog: shared_catalog.clone(),
                endpoints: Endpoints::from_config(&config.catalog),
                surface_path: surface.path().to_path_buf(),
                command_tx: api_tx,
            },
        );
        served_at = Some(format!(
            "http://{}:{}/zone",
            config.http.bind_address, config.http.port
        ));
    }

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        &config,
        surface,
        shared_catalog,
        log_path,
        sort_key,
        args.id,
        served_at,
    );
    app.run(api_rx).await?;

    tracing::info!("zones exiting");
    Ok(())
}
