//! Placeholder substitution for cover and content locations.

use crate::catalog::ZoneRecord;
use crate::config::CatalogConfig;

pub const COVER_TOKEN: &str = "{COVER_URL}";
pub const HTML_TOKEN: &str = "{HTML_URL}";

/// The two base locations the manifest templates are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub cover_base: String,
    pub html_base: String,
}

/// Where opening a zone leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTarget {
    /// Absolute address: hand the whole view over to it.
    External(String),
    /// Resolved document location to fetch into the display surface.
    Embedded(String),
}

impl Endpoints {
    pub fn new(cover_base: impl Into<String>, html_base: impl Into<String>) -> Self {
        Self {
            cover_base: cover_base.into(),
            html_base: html_base.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.cover_base.clone(), config.html_base.clone())
    }

    /// Substitute the first occurrence of each token.
    pub fn resolve(&self, template: &str) -> String {
        template
            .replacen(COVER_TOKEN, &self.cover_base, 1)
            .replacen(HTML_TOKEN, &self.html_base, 1)
    }

    pub fn cover_url(&self, record: &ZoneRecord) -> String {
        self.resolve(&record.cover_template)
    }

    pub fn content_target(&self, record: &ZoneRecord) -> ContentTarget {
        if is_external(&record.content_template) {
            ContentTarget::External(record.content_template.clone())
        } else {
            ContentTarget::Embedded(self.resolve(&record.content_template))
        }
    }
}

/// True for templates that are already a full `http://` / `https://` address.
pub fn is_external(template: &str) -> bool {
    let lower = template.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new("https://covers.test", "https://html.test")
    }

    fn record(url: &str) -> ZoneRecord {
        ZoneRecord {
            id: 1,
            name: "One".to_string(),
            cover_template: "{COVER_URL}/1.png".to_string(),
            content_template: url.to_string(),
        }
    }

    #[test]
    fn test_resolve_both_tokens() {
        let e = endpoints();
        assert_eq!(e.resolve("{HTML_URL}/1.html"), "https://html.test/1.html");
        assert_eq!(e.resolve("{COVER_URL}/a/{HTML_URL}"), "https://covers.test/a/https://html.test");
        assert_eq!(e.resolve("plain/path"), "plain/path");
    }

    #[test]
    fn test_resolve_replaces_first_occurrence_only() {
        assert_eq!(
            endpoints().resolve("{HTML_URL}/{HTML_URL}"),
            "https://html.test/{HTML_URL}"
        );
    }

    #[test]
    fn test_content_target() {
        let e = endpoints();
        assert_eq!(
            e.content_target(&record("https://example.com/game")),
            ContentTarget::External("https://example.com/game".to_string())
        );
        assert_eq!(
            e.content_target(&record("{HTML_URL}/1.html")),
            ContentTarget::Embedded("https://html.test/1.html".to_string())
        );
        assert_eq!(e.cover_url(&record("x")), "https://covers.test/1.png");
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("http://a"));
        assert!(is_external("HTTPS://a"));
        assert!(!is_external("{HTML_URL}/http.html"));
        assert!(!is_external("httpish/1.html"));
    }
}
