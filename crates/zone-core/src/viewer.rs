//! Zone loader: opens a catalog entry into the display surface, or hands it
//! off to the browser when the entry is an external address.
//!
//! Opening is split in two so the caller can run the network fetch on its
//! own task: [`ZoneViewer::plan_open`] decides what to do and stamps the
//! request with a generation, [`ZoneViewer::complete_open`] applies the
//! fetched document. [`ZoneViewer::open`] does both in one call.

use tracing::{debug, info};

use crate::catalog::ZoneRecord;
use crate::error::ZoneError;
use crate::loader::fetch_text;
use crate::platform;
use crate::surface::DisplaySurface;
use crate::template::{ContentTarget, Endpoints};

/// Hands an address to something that can show it as a whole new page.
pub trait Navigator: Send {
    fn navigate(&mut self, url: &str) -> anyhow::Result<()>;
}

/// The desktop's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Navigator for SystemBrowser {
    fn navigate(&mut self, url: &str) -> anyhow::Result<()> {
        info!("navigating to {}", url);
        platform::open_in_browser(url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenPlan {
    /// External entry: navigate, never touch the surface.
    Navigate(String),
    /// Fetch `url` and pass the result to `complete_open` with `generation`.
    Fetch { generation: u64, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Navigated(String),
    Displayed,
    /// A newer open or a close happened while the fetch was in flight; the
    /// document was discarded.
    Superseded,
}

pub struct ZoneViewer<S: DisplaySurface> {
    endpoints: Endpoints,
    surface: S,
    current: Option<ZoneRecord>,
    visible: bool,
    generation: u64,
}

impl<S: DisplaySurface> ZoneViewer<S> {
    pub fn new(endpoints: Endpoints, surface: S) -> Self {
        Self {
            endpoints,
            surface,
            current: None,
            visible: false,
            generation: 0,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The zone whose name/id labels are shown. Survives `close` so the
    /// last zone can still be reopened in a new context.
    pub fn current(&self) -> Option<&ZoneRecord> {
        self.current.as_ref()
    }

    /// `(name, id)` labels for the viewer header.
    pub fn labels(&self) -> Option<(&str, i64)> {
        self.current.as_ref().map(|z| (z.name.as_str(), z.id))
    }

    pub fn plan_open(&mut self, record: &ZoneRecord) -> OpenPlan {
        match self.endpoints.content_target(record) {
            ContentTarget::External(url) => OpenPlan::Navigate(url),
            ContentTarget::Embedded(url) => {
                self.generation += 1;
                OpenPlan::Fetch {
                    generation: self.generation,
                    url,
                }
            }
        }
    }

    /// Apply a finished fetch. Errors leave the viewer exactly as it was.
    pub fn complete_open(
        &mut self,
        generation: u64,
        record: &ZoneRecord,
        fetched: Result<String, ZoneError>,
    ) -> Result<OpenOutcome, ZoneError> {
        if generation != self.generation {
            debug!(
                "dropping zone {} document from request {} (latest is {})",
                record.id, generation, self.generation
            );
            return Ok(OpenOutcome::Superseded);
        }
        let html = fetched?;
        self.surface.write_document(&html)?;
        self.current = Some(record.clone());
        self.visible = true;
        info!("opened zone {} ({})", record.id, record.name);
        Ok(OpenOutcome::Displayed)
    }

    pub async fn open<N: Navigator>(
        &mut self,
        client: &reqwest::Client,
        navigator: &mut N,
        record: &ZoneRecord,
    ) -> Result<OpenOutcome, ZoneError> {
        match self.plan_open(record) {
            OpenPlan::Navigate(url) => {
                navigator.navigate(&url).map_err(ZoneError::Navigate)?;
                Ok(OpenOutcome::Navigated(url))
            }
            OpenPlan::Fetch { generation, url } => {
                let fetched = fetch_text(client, &url).await;
                self.complete_open(generation, record, fetched)
            }
        }
    }

    /// Hide the viewer and replace the surface with a blank one. Any fetch
    /// still in flight is invalidated.
    pub fn close(&mut self) -> Result<(), ZoneError> {
        self.visible = false;
        self.generation += 1;
        self.surface.recreate()?;
        Ok(())
    }

    /// Resolved content address of the current zone, for re-fetching it
    /// into a separate context.
    pub fn new_context_url(&self) -> Result<String, ZoneError> {
        let record = self.current.as_ref().ok_or(ZoneError::NothingOpen)?;
        match self.endpoints.content_target(record) {
            ContentTarget::External(url) | ContentTarget::Embedded(url) => Ok(url),
        }
    }
}

/// Fetch `url` again (never reusing the viewer's document) and write it into
/// a surface created just for this context.
pub async fn render_into_new_context<T: DisplaySurface>(
    client: &reqwest::Client,
    url: &str,
    mut surface: T,
) -> Result<T, ZoneError> {
    let html = fetch_text(client, url).await?;
    surface.write_document(&html)?;
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    fn viewer() -> ZoneViewer<MemorySurface> {
        ZoneViewer::new(
            Endpoints::new("https://covers.test", "https://html.test"),
            MemorySurface::new(),
        )
    }

    fn zone(id: i64, url: &str) -> ZoneRecord {
        ZoneRecord {
            id,
            name: format!("Zone {}", id),
            cover_template: String::new(),
            content_template: url.to_string(),
        }
    }

    #[test]
    fn test_external_entry_plans_navigation() {
        let mut v = viewer();
        let plan = v.plan_open(&zone(1, "https://example.com/game"));
        assert_eq!(plan, OpenPlan::Navigate("https://example.com/game".to_string()));
        assert!(!v.is_visible());
    }

    #[test]
    fn test_complete_open_displays_and_labels() {
        let mut v = viewer();
        let z = zone(4, "{HTML_URL}/4.html");
        let OpenPlan::Fetch { generation, url } = v.plan_open(&z) else {
            panic!("expected fetch plan");
        };
        assert_eq!(url, "https://html.test/4.html");
        let outcome = v.complete_open(generation, &z, Ok("<h1>4</h1>".to_string())).unwrap();
        assert_eq!(outcome, OpenOutcome::Displayed);
        assert!(v.is_visible());
        assert_eq!(v.labels(), Some(("Zone 4", 4)));
        assert_eq!(v.surface().document(), Some("<h1>4</h1>"));
    }

    #[test]
    fn test_failed_fetch_leaves_previous_state() {
        let mut v = viewer();
        let first = zone(1, "{HTML_URL}/1.html");
        let OpenPlan::Fetch { generation, .. } = v.plan_open(&first) else {
            panic!("expected fetch plan");
        };
        v.complete_open(generation, &first, Ok("one".to_string())).unwrap();

        let second = zone(2, "{HTML_URL}/2.html");
        let OpenPlan::Fetch { generation, .. } = v.plan_open(&second) else {
            panic!("expected fetch plan");
        };
        let err = v
            .complete_open(generation, &second, Err(ZoneError::Fetch { status: 404 }))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 404");
        assert_eq!(v.labels(), Some(("Zone 1", 1)));
        assert_eq!(v.surface().document(), Some("one"));
        assert_eq!(v.surface().writes, 1);
    }

    #[test]
    fn test_close_discards_in_flight_result() {
        let mut v = viewer();
        let z = zone(3, "{HTML_URL}/3.html");
        let OpenPlan::Fetch { generation, .. } = v.plan_open(&z) else {
            panic!("expected fetch plan");
        };
        v.close().unwrap();
        let outcome = v.complete_open(generation, &z, Ok("late".to_string())).unwrap();
        assert_eq!(outcome, OpenOutcome::Superseded);
        assert!(!v.is_visible());
        assert!(v.surface().document().is_none());
        assert_eq!(v.surface().recreations, 1);
    }

    #[test]
    fn test_older_open_cannot_overwrite_newer() {
        let mut v = viewer();
        let a = zone(1, "{HTML_URL}/1.html");
        let b = zone(2, "{HTML_URL}/2.html");
        let OpenPlan::Fetch { generation: ga, .. } = v.plan_open(&a) else {
            panic!("expected fetch plan");
        };
        let OpenPlan::Fetch { generation: gb, .. } = v.plan_open(&b) else {
            panic!("expected fetch plan");
        };
        v.complete_open(gb, &b, Ok("b".to_string())).unwrap();
        assert_eq!(
            v.complete_open(ga, &a, Ok("a".to_string())).unwrap(),
            OpenOutcome::Superseded
        );
        assert_eq!(v.surface().document(), Some("b"));
        assert_eq!(v.labels(), Some(("Zone 2", 2)));
    }

    #[test]
    fn test_new_context_url_requires_open_zone() {
        let mut v = viewer();
        assert!(matches!(v.new_context_url(), Err(ZoneError::NothingOpen)));
        let z = zone(9, "{HTML_URL}/9.html");
        let OpenPlan::Fetch { generation, .. } = v.plan_open(&z) else {
            panic!("expected fetch plan");
        };
        v.complete_open(generation, &z, Ok("nine".to_string())).unwrap();
        v.close().unwrap();
        assert_eq!(v.new_context_url().unwrap(), "https://html.test/9.html");
    }
}
