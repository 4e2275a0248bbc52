//! Display surfaces: the isolated place a zone document is rendered into.
//!
//! A surface only ever holds one whole document. Writing replaces it
//! entirely; there is no incremental patching.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::platform;

pub trait DisplaySurface: Send {
    /// Replace the current document with `html`.
    fn write_document(&mut self, html: &str) -> std::io::Result<()>;

    /// The document currently shown, `None` for a blank surface.
    fn document(&self) -> Option<&str>;

    /// Throw this surface away and start over with a blank one.
    fn recreate(&mut self) -> std::io::Result<()>;

    /// Address a browser can load to view the surface, if it has one.
    fn location(&self) -> Option<String> {
        None
    }
}

/// Surface kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    document: Option<String>,
    /// Number of completed writes since creation.
    pub writes: usize,
    /// Number of times the surface was recreated.
    pub recreations: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySurface for MemorySurface {
    fn write_document(&mut self, html: &str) -> std::io::Result<()> {
        self.document = Some(html.to_string());
        self.writes += 1;
        Ok(())
    }

    fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    fn recreate(&mut self) -> std::io::Result<()> {
        self.document = None;
        self.recreations += 1;
        Ok(())
    }
}

static FRESH_SERIAL: AtomicU64 = AtomicU64::new(0);

/// Surface backed by an HTML file, so a real browser (or the local HTTP
/// server) can display it. Writes go to a temp file in the same directory
/// and are renamed over the target, so readers never see half a document.
#[derive(Debug)]
pub struct FileSurface {
    dir: PathBuf,
    path: PathBuf,
    document: Option<String>,
}

impl FileSurface {
    pub const DOCUMENT_NAME: &'static str = "zone.html";

    /// The long-lived surface at `<dir>/zone.html`, starting blank.
    pub fn create(dir: &Path) -> std::io::Result<Self> {
        Self::create_at(dir, dir.join(Self::DOCUMENT_NAME))
    }

    /// A brand-new surface with a unique file name, used for opening a zone
    /// in a separate browser context.
    pub fn create_fresh(dir: &Path) -> std::io::Result<Self> {
        let serial = FRESH_SERIAL.fetch_add(1, Ordering::Relaxed);
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let name = format!("zone-{}-{}-{}.html", stamp, std::process::id(), serial);
        Self::create_at(dir, dir.join(name))
    }

    fn create_at(dir: &Path, path: PathBuf) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let mut surface = Self {
            dir: dir.to_path_buf(),
            path,
            document: None,
        };
        surface.persist("")?;
        Ok(surface)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&mut self, html: &str) -> std::io::Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(html.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl DisplaySurface for FileSurface {
    fn write_document(&mut self, html: &str) -> std::io::Result<()> {
        self.persist(html)?;
        self.document = Some(html.to_string());
        Ok(())
    }

    fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    fn recreate(&mut self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        self.document = None;
        self.persist("")
    }

    fn location(&self) -> Option<String> {
        Some(platform::file_url(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_surface_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = FileSurface::create(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(surface.path()).unwrap(), "");
        assert!(surface.document().is_none());

        surface.write_document("<p>first, and rather long</p>").unwrap();
        surface.write_document("<p>2</p>").unwrap();
        assert_eq!(std::fs::read_to_string(surface.path()).unwrap(), "<p>2</p>");
        assert_eq!(surface.document(), Some("<p>2</p>"));
    }

    #[test]
    fn test_file_surface_recreate_blanks_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = FileSurface::create(dir.path()).unwrap();
        surface.write_document("<p>stale</p>").unwrap();
        surface.recreate().unwrap();
        assert!(surface.document().is_none());
        assert_eq!(std::fs::read_to_string(surface.path()).unwrap(), "");
        assert!(surface.location().unwrap().starts_with("file://"));
    }

    #[test]
    fn test_fresh_surfaces_do_not_share_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = FileSurface::create_fresh(dir.path()).unwrap();
        let b = FileSurface::create_fresh(dir.path()).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_memory_surface_counts() {
        let mut surface = MemorySurface::new();
        surface.write_document("a").unwrap();
        surface.recreate().unwrap();
        assert_eq!(surface.writes, 1);
        assert_eq!(surface.recreations, 1);
        assert!(surface.location().is_none());
    }
}
