//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks
//!   (terminal events, catalog loads, zone fetches, HTTP API requests).
//! - The event loop draws each frame, then awaits the next message or timer.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Network work always runs on spawned tasks; results come back as messages.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use zone_core::config::Config;
use zone_core::loader::{self, fetch_text, CatalogLoader};
use zone_core::surface::{DisplaySurface, FileSurface};
use zone_core::template::Endpoints;
use zone_core::view::CatalogState;
use zone_core::viewer::{
    render_into_new_context, Navigator, OpenOutcome, OpenPlan, SystemBrowser, ZoneViewer,
};
use zone_core::{platform, Catalog, SortKey, ZoneError, ZoneRecord};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        alert_overlay::AlertOverlay,
        help_overlay::HelpOverlay,
        log_panel::{warnings_from_log, LogPanel},
        zone_list::ZoneList,
        zone_viewer::ZoneViewerPane,
    },
    focus::FocusRing,
    http::{ApiCommand, SharedCatalog},
    widgets::{
        status_bar::{self, InputMode, Summary},
        toast::{Severity, ToastManager},
    },
};

/// A gap this long between wake checks means the machine was asleep.
const WAKE_GAP_SECS: i64 = 60;

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    CatalogLoaded(Result<Catalog, String>),
    ZoneFetched {
        generation: u64,
        record: ZoneRecord,
        result: Result<String, ZoneError>,
    },
    NewContextReady(Result<FileSurface, ZoneError>),
    Api(ApiCommand),
}

/// Last-drawn layout rects, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
struct PaneAreas {
    zone_list: Rect,
    zone_viewer: Rect,
    log_panel: Rect,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    zone_list: ZoneList,
    zone_viewer: ZoneViewerPane,
    help_overlay: HelpOverlay,
    alert: AlertOverlay,
    log_panel: LogPanel,
    focus: FocusRing,

    // ── Catalog / viewer plumbing ─────────────────────────────────────────────
    viewer: ZoneViewer<FileSurface>,
    loader: CatalogLoader,
    client: reqwest::Client,
    navigator: SystemBrowser,
    /// Copy of the catalog the HTTP API reads.
    shared_catalog: SharedCatalog,
    surface_dir: PathBuf,
    /// Zone to open once the first catalog load finishes.
    startup_id: Option<i64>,
    catalog_loading: bool,
    catalog_loads: u32,
    last_wake_check: DateTime<Local>,

    /// Sender handed to background tasks.
    tx: Option<mpsc::Sender<AppMessage>>,

    should_quit: bool,
    show_keys_bar: bool,
    pane_areas: PaneAreas,
    toast: ToastManager,
}

impl App {
    pub fn new(
        config: &Config,
        surface: FileSurface,
        shared_catalog: SharedCatalog,
        log_path: PathBuf,
        sort_key: SortKey,
        startup_id: Option<i64>,
        served_at: Option<String>,
    ) -> Self {
        let endpoints = Endpoints::from_config(&config.catalog);
        let client = loader::http_client();
        let mut state = AppState::new(sort_key, endpoints.clone(), log_path);
        state.served_at = served_at;

        let mut app = Self {
            state,
            zone_list: ZoneList::new(),
            zone_viewer: ZoneViewerPane::new(),
            help_overlay: HelpOverlay::new(),
            alert: AlertOverlay::new(),
            log_panel: LogPanel::new(),
            focus: FocusRing::default(),
            viewer: ZoneViewer::new(endpoints, surface),
            loader: CatalogLoader::new(client.clone(), &config.catalog),
            client,
            navigator: SystemBrowser,
            shared_catalog,
            surface_dir: config.paths.surface_dir.clone(),
            startup_id,
            catalog_loading: false,
            catalog_loads: 0,
            last_wake_check: Local::now(),
            tx: None,
            should_quit: false,
            show_keys_bar: true,
            pane_areas: PaneAreas::default(),
            toast: ToastManager::new(),
        };
        app.sync_viewer();
        app
    }

    pub async fn run(mut self, mut api_rx: mpsc::Receiver<ApiCommand>) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);
        self.tx = Some(tx.clone());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: HTTP API requests ────────────────────────────────
        let api_tx = tx.clone();
        tokio::spawn(async move {
            while let Some(cmd) = api_rx.recv().await {
                if api_tx.send(AppMessage::Api(cmd)).await.is_err() {
                    break;
                }
            }
        });

        self.start_catalog_load().await;

        // ── Periodic timers ───────────────────────────────────────────────────
        // Toast expiry + spinner animation + component maintenance.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // zones.log tail refresh: every 2s, only when the log panel is open
        let mut log_refresh = tokio::time::interval(Duration::from_secs(2));
        log_refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Sleep detection and date rollover.
        let mut wake_check = tokio::time::interval(Duration::from_secs(10));
        wake_check.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    const MAX_DRAIN: usize = 64;
                    let mut redraw = self.handle_message(msg).await;
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let next = match rx.try_recv() {
                            Ok(v) => v,
                            Err(_) => break,
                        };
                        drained += 1;
                        redraw |= self.handle_message(next).await;
                    }
                    needs_redraw = redraw;
                }

                _ = ui_tick.tick() => {
                    self.toast.tick();
                    let mut actions = self.zone_list.tick(&self.state);
                    actions.extend(self.zone_viewer.tick(&self.state));
                    for a in actions {
                        self.dispatch(a).await;
                    }
                    needs_redraw = true;
                }

                _ = log_refresh.tick() => {
                    if self.log_panel.visible {
                        self.reload_log();
                        needs_redraw = true;
                    }
                }

                _ = wake_check.tick() => {
                    needs_redraw = self.check_wake().await;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Message handler ───────────────────────────────────────────────────────

    /// Returns `true` if the message requires a redraw.
    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    let actions = self.handle_key(key);
                    for a in actions {
                        self.dispatch(a).await;
                    }
                }
                Event::Mouse(mouse) => {
                    let actions = self.handle_mouse(mouse);
                    for a in actions {
                        self.dispatch(a).await;
                    }
                }
                Event::Resize(w, h) => {
                    self.dispatch(Action::Resize(w, h)).await;
                }
                _ => return false,
            },

            AppMessage::CatalogLoaded(result) => {
                self.on_catalog_loaded(result).await;
            }

            AppMessage::ZoneFetched {
                generation,
                record,
                result,
            } => {
                self.on_zone_fetched(generation, record, result);
            }

            AppMessage::NewContextReady(result) => match result {
                Ok(surface) => {
                    let url = platform::file_url(surface.path());
                    match self.navigator.navigate(&url) {
                        Ok(()) => self
                            .toast
                            .resolve_spinner(Severity::Success, "opened in a new window"),
                        Err(e) => {
                            warn!("new window hand-off failed: {:#}", e);
                            self.toast.dismiss_spinner();
                            self.alert
                                .show(format!("Failed to load zone: {}", ZoneError::Navigate(e)));
                        }
                    }
                }
                Err(e) => {
                    warn!("new window fetch failed: {}", e);
                    self.toast.dismiss_spinner();
                    self.alert.show(format!("Failed to load zone: {}", e));
                }
            },

            AppMessage::Api(ApiCommand::Open(id)) => {
                info!("open requested over HTTP: zone {}", id);
                self.dispatch(Action::Open(id)).await;
            }
        }
        true
    }

    async fn on_catalog_loaded(&mut self, result: Result<Catalog, String>) {
        self.catalog_loading = false;
        self.catalog_loads += 1;
        match result {
            Ok(mut catalog) => {
                // The sort key may have changed while the load was in flight.
                if catalog.sort_key() != Some(self.state.sort_key) {
                    catalog.sort_by(self.state.sort_key);
                }
                let count = catalog.len();
                self.state.catalog = CatalogState::Ready(catalog);
                if self.catalog_loads > 1 {
                    self.toast.info(format!("catalog reloaded: {} zones", count));
                }
            }
            Err(reason) => {
                error!("catalog load failed: {}", reason);
                self.state.catalog = CatalogState::Failed(reason);
            }
        }
        *self.shared_catalog.write().await = self.state.catalog.clone();
        self.zone_list.sync(&self.state);

        if let Some(id) = startup_open(&self.state.catalog, self.startup_id.take()) {
            info!("opening startup zone {}", id);
            self.dispatch(Action::Open(id)).await;
        }
    }

    fn on_zone_fetched(
        &mut self,
        generation: u64,
        record: ZoneRecord,
        result: Result<String, ZoneError>,
    ) {
        match self.viewer.complete_open(generation, &record, result) {
            Ok(OpenOutcome::Displayed) => {
                self.state.viewer.pending = None;
                self.toast
                    .resolve_spinner(Severity::Success, format!("opened {}", record.name));
                self.sync_viewer();
                self.focus.set(ComponentId::ZoneViewer);
            }
            // A newer open or a close owns the viewer now.
            Ok(_) => {}
            Err(e) => {
                warn!("zone {} failed to load: {}", record.id, e);
                self.state.viewer.pending = None;
                self.toast.dismiss_spinner();
                self.alert.show(format!("Failed to load zone: {}", e));
            }
        }
    }

    /// Reload the catalog after a sleep and keep the zone-of-the-day date current.
    async fn check_wake(&mut self) -> bool {
        let now = Local::now();
        let slept = slept_between(self.last_wake_check, now);
        self.last_wake_check = now;

        let today = zone_core::daily::today();
        let date_changed = today != self.state.today;
        self.state.today = today;

        if slept {
            info!("wake detected; reloading catalog");
            self.dispatch(Action::Reload).await;
            return true;
        }
        date_changed
    }

    async fn start_catalog_load(&mut self) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        if self.catalog_loading {
            debug!("catalog load already in flight");
            return;
        }
        self.catalog_loading = true;
        // Keep a loaded catalog on screen until the new one arrives.
        if !matches!(self.state.catalog, CatalogState::Ready(_)) {
            self.state.catalog = CatalogState::Loading;
            *self.shared_catalog.write().await = CatalogState::Loading;
            self.zone_list.sync(&self.state);
        }
        let loader = self.loader.clone();
        let order = self.state.sort_key;
        tokio::spawn(async move {
            let result = loader.load(order).await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::CatalogLoaded(result)).await;
        });
    }

    // ── Keyboard handling ─────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // The alert blocks everything until dismissed.
        if self.alert.is_visible() {
            return self.alert.handle_key(key, &self.state);
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }

        let normal = self.state.input_mode == InputMode::Normal;
        if normal {
            match key.code {
                KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE => {
                    return vec![Action::Quit]
                }
                KeyCode::Char('?') => return vec![Action::ToggleHelp],
                KeyCode::Char('L') => return vec![Action::ToggleLogs],
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                KeyCode::Char('R') => return vec![Action::Reload],
                KeyCode::Char('F') => return vec![Action::ToggleMaximize],
                _ => {}
            }
        }

        // Tab / Shift-Tab always cycle focus (in filter mode, it closes filter first)
        match key.code {
            KeyCode::Tab => {
                if !normal {
                    return vec![Action::CloseFilter, Action::FocusNext];
                }
                return vec![Action::FocusNext];
            }
            KeyCode::BackTab => {
                if !normal {
                    return vec![Action::CloseFilter, Action::FocusPrev];
                }
                return vec![Action::FocusPrev];
            }
            _ => {}
        }

        // Viewer keys work from any pane while a zone is open.
        if normal && self.state.viewer.visible {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('x') => return vec![Action::CloseZone],
                KeyCode::Char('n') => return vec![Action::OpenInNewContext],
                KeyCode::Char('b') => return vec![Action::ShowInBrowser],
                _ => {}
            }
        }

        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::ZoneList) => self.zone_list.handle_key(key, s),
            Some(ComponentId::ZoneViewer) => self.zone_viewer.handle_key(key, s),
            Some(ComponentId::LogPanel) => self.log_panel.handle_key(key, s),
            _ => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }

        if self.alert.is_visible() {
            return self.alert.handle_mouse(event, Rect::default(), &self.state);
        }
        if self.help_overlay.visible {
            if matches!(event.kind, MouseEventKind::Down(_)) {
                return vec![Action::ToggleHelp];
            }
            return vec![];
        }

        let col = event.column;
        let row = event.row;

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas.clone();
        let s = &self.state;

        // Focus follows the click.
        macro_rules! click_pane {
            ($id:expr, $component:expr, $area:expr) => {{
                let mut actions = $component.handle_mouse(event, $area, s);
                if self.focus.current() != Some($id) {
                    actions.insert(0, Action::FocusPane($id));
                }
                return actions;
            }};
        }

        if hit(areas.zone_list, col, row) {
            click_pane!(ComponentId::ZoneList, self.zone_list, areas.zone_list);
        }
        if hit(areas.zone_viewer, col, row) {
            click_pane!(ComponentId::ZoneViewer, self.zone_viewer, areas.zone_viewer);
        }
        if hit(areas.log_panel, col, row) {
            click_pane!(ComponentId::LogPanel, self.log_panel, areas.log_panel);
        }

        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        // Broadcast to all components first so their own state is current
        // before the app reacts.
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.zone_list.on_action(&action, s));
            out.extend(self.zone_viewer.on_action(&action, s));
            out.extend(self.log_panel.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out.extend(self.alert.on_action(&action, s));
            out
        };

        self.apply_action(action).await;

        // Secondary actions are applied one level deep.
        for a in secondary {
            self.apply_action(a).await;
        }
    }

    async fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            // ── Zones ─────────────────────────────────────────────────────────
            Action::Open(id) => {
                match self.state.catalog.find(id).cloned() {
                    Some(record) => self.open_zone(record),
                    None => debug!("open: no zone with id {}", id),
                }
            }
            Action::CloseZone => {
                if let Err(e) = self.viewer.close() {
                    warn!("display surface could not be recreated: {}", e);
                    self.toast.error(format!("surface error: {}", e));
                }
                self.state.viewer.pending = None;
                self.toast.dismiss_spinner();
                self.sync_viewer();
                self.focus.set(ComponentId::ZoneList);
            }
            Action::OpenInNewContext => self.open_in_new_context(),
            Action::ShowInBrowser => match self.viewer.surface().location() {
                Some(url) => {
                    if let Err(e) = self.navigator.navigate(&url) {
                        warn!("browser hand-off failed: {:#}", e);
                        self.toast.error(format!("browser error: {}", e));
                    }
                }
                None => self.toast.warning("the display surface has no address"),
            },
            Action::ToggleMaximize => {
                if self.state.viewer.visible {
                    self.state.maximized = !self.state.maximized;
                    self.sync_focus_ring();
                    if self.state.maximized {
                        self.focus.set(ComponentId::ZoneViewer);
                    }
                } else {
                    self.toast.info("no zone open");
                }
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => self.focus.set(id),

            // ── Filter ────────────────────────────────────────────────────────
            Action::OpenFilter => {
                self.state.input_mode = InputMode::Filter;
                self.focus.set(ComponentId::ZoneList);
            }
            Action::CloseFilter => {
                self.state.input_mode = InputMode::Normal;
            }
            Action::FilterChanged(query) => {
                self.state.query = query;
            }
            Action::ClearFilter => {
                self.state.query.clear();
                self.state.input_mode = InputMode::Normal;
            }

            // ── Catalog ───────────────────────────────────────────────────────
            Action::CycleSort => self.apply_sort(self.state.sort_key.next()).await,
            Action::CycleSortReverse => self.apply_sort(self.state.sort_key.prev()).await,
            Action::Reload => self.start_catalog_load().await,

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleLogs => {
                self.sync_focus_ring();
                if self.log_panel.visible {
                    // Load immediately so the panel is not blank
                    self.reload_log();
                    self.focus.set(ComponentId::LogPanel);
                }
            }
            Action::ToggleKeys => {
                self.show_keys_bar = !self.show_keys_bar;
            }

            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text.clone()
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            Action::Quit => {
                self.should_quit = true;
            }

            // Handled at component level / no-op here
            Action::ToggleHelp | Action::DismissAlert | Action::Resize(_, _) => {}
        }
    }

    fn open_zone(&mut self, record: ZoneRecord) {
        match self.viewer.plan_open(&record) {
            OpenPlan::Navigate(url) => match self.navigator.navigate(&url) {
                Ok(()) => self.toast.info(format!("{} opened in the browser", record.name)),
                Err(e) => {
                    warn!("zone {} hand-off failed: {:#}", record.id, e);
                    self.alert
                        .show(format!("Failed to load zone: {}", ZoneError::Navigate(e)));
                }
            },
            OpenPlan::Fetch { generation, url } => {
                let Some(tx) = self.tx.clone() else {
                    return;
                };
                self.state.viewer.pending = Some(record.name.clone());
                self.toast.spinner(format!("loading {}…", record.name));
                let client = self.client.clone();
                tokio::spawn(async move {
                    let result = fetch_text(&client, &url).await;
                    let _ = tx
                        .send(AppMessage::ZoneFetched {
                            generation,
                            record,
                            result,
                        })
                        .await;
                });
            }
        }
    }

    fn open_in_new_context(&mut self) {
        let url = match self.viewer.new_context_url() {
            Ok(url) => url,
            Err(e) => {
                self.toast.warning(e.to_string());
                return;
            }
        };
        let Some(tx) = self.tx.clone() else {
            return;
        };
        self.toast.spinner("opening a new window…");
        let client = self.client.clone();
        let dir = self.surface_dir.clone();
        tokio::spawn(async move {
            let result = async {
                let surface = FileSurface::create_fresh(&dir)?;
                render_into_new_context(&client, &url, surface).await
            }
            .await;
            let _ = tx.send(AppMessage::NewContextReady(result)).await;
        });
    }

    async fn apply_sort(&mut self, key: SortKey) {
        self.state.sort_key = key;
        self.state.catalog.sort_by(key);
        self.shared_catalog.write().await.sort_by(key);
        self.zone_list.sync(&self.state);
        self.toast.info(format!("sorted by {}", key));
    }

    /// Copy the viewer's state into `AppState` for the components.
    fn sync_viewer(&mut self) {
        let info = &mut self.state.viewer;
        info.visible = self.viewer.is_visible();
        let labels = self.viewer.labels();
        info.name = labels.map(|(name, _)| name.to_string());
        info.id = labels.map(|(_, id)| id);
        info.document = self.viewer.surface().document().map(str::to_string);
        info.location = self.viewer.surface().location();
        if !info.visible {
            self.state.maximized = false;
        }
        self.sync_focus_ring();
    }

    fn sync_focus_ring(&mut self) {
        let mut items = Vec::new();
        if !(self.state.maximized && self.state.viewer.visible) {
            items.push(ComponentId::ZoneList);
        }
        items.push(ComponentId::ZoneViewer);
        if self.log_panel.visible {
            items.push(ComponentId::LogPanel);
        }
        self.focus.set_items(items);
    }

    fn reload_log(&mut self) {
        match std::fs::read_to_string(&self.state.log_path) {
            Ok(content) => self.state.log_lines = warnings_from_log(&content),
            Err(e) => debug!("log unreadable at {}: {}", self.state.log_path.display(), e),
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Outer layout: summary | body | (log) | (keys) ────────────────────
        let keys_h = if self.show_keys_bar { 1u16 } else { 0 };
        let log_h = if self.log_panel.visible { 10u16 } else { 0 };

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(log_h),
                Constraint::Length(keys_h),
            ])
            .split(area);

        let summary_area = outer[0];
        let body_area = outer[1];
        let log_area = outer[2];
        let keys_area = outer[3];

        // ── Summary bar ───────────────────────────────────────────────────────
        {
            let gallery = self.state.gallery();
            let count_label = gallery.count_label();
            let summary = Summary {
                count_label: &count_label,
                sort_label: self.state.sort_key.label(),
                zone_of_the_day: gallery.zone_of_the_day.map(|z| z.name.as_str()),
                loading: matches!(self.state.catalog, CatalogState::Loading),
                failed: matches!(self.state.catalog, CatalogState::Failed(_)),
                open_zone: if self.state.viewer.visible {
                    self.state.viewer.name.as_deref()
                } else {
                    None
                },
            };
            status_bar::draw_summary_bar(frame, summary_area, &summary);
        }

        // ── Body: gallery | viewer ────────────────────────────────────────────
        if self.state.maximized && self.state.viewer.visible {
            self.zone_viewer.draw(
                frame,
                body_area,
                self.focus.is_focused(ComponentId::ZoneViewer),
                &self.state,
            );
            self.pane_areas.zone_list = Rect::default();
            self.pane_areas.zone_viewer = body_area;
        } else {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(body_area);
            self.zone_list.draw(
                frame,
                cols[0],
                self.focus.is_focused(ComponentId::ZoneList),
                &self.state,
            );
            self.zone_viewer.draw(
                frame,
                cols[1],
                self.focus.is_focused(ComponentId::ZoneViewer),
                &self.state,
            );
            self.pane_areas.zone_list = cols[0];
            self.pane_areas.zone_viewer = cols[1];
        }

        // ── Log panel ─────────────────────────────────────────────────────────
        if self.log_panel.visible {
            let log_focused = self.focus.is_focused(ComponentId::LogPanel);
            self.log_panel.draw(frame, log_area, log_focused, &self.state);
            self.pane_areas.log_panel = log_area;
        } else {
            self.pane_areas.log_panel = Rect::default();
        }

        // ── Keys bar ──────────────────────────────────────────────────────────
        if self.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                keys_area,
                self.state.input_mode,
                self.state.viewer.visible,
            );
        }

        // ── Overlays (on top of everything) ──────────────────────────────────
        if self.help_overlay.visible {
            self.help_overlay.draw(frame, area, false, &self.state);
        }
        self.alert.draw(frame, area, true, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

/// Whether the wall clock jumped far enough between two checks that the
/// machine must have been asleep.
fn slept_between(prev: DateTime<Local>, now: DateTime<Local>) -> bool {
    now.signed_duration_since(prev) > chrono::Duration::seconds(WAKE_GAP_SECS)
}

/// The zone to open once the first catalog load settles, if any. The id is
/// spent either way: a miss or a failed load never retries.
fn startup_open(catalog: &CatalogState, id: Option<i64>) -> Option<i64> {
    let id = id?;
    if catalog.find(id).is_some() {
        return Some(id);
    }
    debug!("startup zone {} not in catalog; ignoring", id);
    None
}
