use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::catalog::SortKey;
use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Remote endpoints the catalog and zone content are fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON array of zone records.
    #[serde(default = "default_manifest_url")]
    pub manifest_url: String,
    /// Per-file hit statistics; best effort.
    #[serde(default = "default_popularity_url")]
    pub popularity_url: String,
    /// Substituted for `{COVER_URL}` in templates.
    #[serde(default = "default_cover_base")]
    pub cover_base: String,
    /// Substituted for `{HTML_URL}` in templates.
    #[serde(default = "default_html_base")]
    pub html_base: String,
    #[serde(default)]
    pub default_sort: SortKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_enabled")]
    pub enabled: bool,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory the display-surface documents are written to.
    /// Defaults to `~/.cache/zones/surface`.
    #[serde(default = "default_surface_dir")]
    pub surface_dir: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            manifest_url: default_manifest_url(),
            popularity_url: default_popularity_url(),
            cover_base: default_cover_base(),
            html_base: default_html_base(),
            default_sort: SortKey::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enabled: default_http_enabled(),
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            surface_dir: default_surface_dir(),
        }
    }
}

fn default_manifest_url() -> String {
    "https://cdn.jsdelivr.net/gh/gn-math/assets@main/zones.json".to_string()
}

fn default_popularity_url() -> String {
    "https://data.jsdelivr.com/v1/stats/packages/gh/gn-math/html@main/files?period=year".to_string()
}

fn default_cover_base() -> String {
    "https://cdn.jsdelivr.net/gh/gn-math/covers@main".to_string()
}

fn default_html_base() -> String {
    "https://cdn.jsdelivr.net/gh/gn-math/html@main".to_string()
}

fn default_http_enabled() -> bool {
    true
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_surface_dir() -> PathBuf {
    platform::cache_dir().join("surface")
}

impl Config {
    /// Load the config from its default location, writing defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            http: HttpConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.http.enabled);
        assert_eq!(config.http.port, 8787);
        assert_eq!(config.http.bind_address, "127.0.0.1");
        assert!(config.catalog.manifest_url.starts_with("https://"));
        assert_eq!(config.catalog.default_sort, SortKey::Name);
        assert!(config.paths.surface_dir.ends_with("zones/surface"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [catalog]
            manifest_url = "http://localhost:1234/zones.json"
            default_sort = "popularity"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.manifest_url, "http://localhost:1234/zones.json");
        assert_eq!(config.catalog.default_sort, SortKey::Popularity);
        assert!(config.catalog.html_base.contains("html@main"));
        assert_eq!(config.http.port, 8787);
    }

    #[test]
    fn test_load_from_writes_defaults_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.catalog.manifest_url, config.catalog.manifest_url);
    }
}
