//! Catalog view: what the gallery shows for a given catalog state and query.

use chrono::NaiveDate;

use crate::catalog::{Catalog, SortKey, ZoneRecord};

/// Lifecycle of the catalog as far as the gallery is concerned.
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    /// The manifest load failed; holds the error text.
    Failed(String),
    Ready(Catalog),
}

impl CatalogState {
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            Self::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// Reorder the catalog if one is loaded.
    pub fn sort_by(&mut self, key: SortKey) {
        if let Self::Ready(catalog) = self {
            catalog.sort_by(key);
        }
    }

    pub fn find(&self, id: i64) -> Option<&ZoneRecord> {
        self.catalog().and_then(|c| c.find(id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gallery<'a> {
    Loading,
    Failed(&'a str),
    /// Catalog loaded but the query matches nothing.
    NoResults,
    Zones(Vec<&'a ZoneRecord>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryView<'a> {
    pub gallery: Gallery<'a>,
    /// Chosen from the full catalog order, regardless of the query.
    pub zone_of_the_day: Option<&'a ZoneRecord>,
}

impl GalleryView<'_> {
    /// Number of rows shown.
    pub fn count(&self) -> usize {
        match &self.gallery {
            Gallery::Zones(zones) => zones.len(),
            _ => 0,
        }
    }

    /// Text that replaces the rows, if the gallery has no rows to show.
    pub fn message(&self) -> Option<String> {
        match &self.gallery {
            Gallery::Loading => Some("Loading zones…".to_string()),
            Gallery::Failed(reason) => Some(format!("Error loading zones: {}", reason)),
            Gallery::NoResults => Some("No zones found.".to_string()),
            Gallery::Zones(_) => None,
        }
    }

    pub fn count_label(&self) -> String {
        format!("Total Zones: {}", self.count())
    }
}

pub fn render<'a>(state: &'a CatalogState, query: &str, today: NaiveDate) -> GalleryView<'a> {
    match state {
        CatalogState::Loading => GalleryView {
            gallery: Gallery::Loading,
            zone_of_the_day: None,
        },
        CatalogState::Failed(reason) => GalleryView {
            gallery: Gallery::Failed(reason),
            zone_of_the_day: None,
        },
        CatalogState::Ready(catalog) => {
            let zones = catalog.filter(query);
            let gallery = if zones.is_empty() {
                Gallery::NoResults
            } else {
                Gallery::Zones(zones)
            };
            GalleryView {
                gallery,
                zone_of_the_day: catalog.zone_of_the_day(today),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SENTINEL_ID;
    use crate::popularity::PopularityIndex;

    fn zone(id: i64, name: &str) -> ZoneRecord {
        ZoneRecord {
            id,
            name: name.to_string(),
            cover_template: String::new(),
            content_template: format!("{{HTML_URL}}/{}.html", id),
        }
    }

    fn ready() -> CatalogState {
        let mut catalog = Catalog::new(
            vec![zone(2, "Beta"), zone(SENTINEL_ID, "Pinned"), zone(1, "Alpha")],
            PopularityIndex::default(),
        );
        catalog.sort_by(SortKey::Id);
        CatalogState::Ready(catalog)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_render_rows_in_catalog_order() {
        let state = ready();
        let view = render(&state, "", today());
        let Gallery::Zones(rows) = &view.gallery else {
            panic!("expected rows");
        };
        let names: Vec<&str> = rows.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["Pinned", "Alpha", "Beta"]);
        assert_eq!(view.count_label(), "Total Zones: 3");
        assert!(view.message().is_none());
    }

    #[test]
    fn test_no_results_differs_from_error() {
        let state = ready();
        let empty = render(&state, "nothing like this", today());
        assert_eq!(empty.gallery, Gallery::NoResults);
        assert_eq!(empty.message().as_deref(), Some("No zones found."));

        let failed = CatalogState::Failed("HTTP error! status: 500".to_string());
        let view = render(&failed, "", today());
        assert_eq!(
            view.message().as_deref(),
            Some("Error loading zones: HTTP error! status: 500")
        );
        assert_ne!(view.gallery, empty.gallery);
        assert_eq!(view.count(), 0);
    }

    #[test]
    fn test_zone_of_the_day_ignores_query() {
        let state = ready();
        let all = render(&state, "", today());
        let filtered = render(&state, "beta", today());
        assert_eq!(all.zone_of_the_day, filtered.zone_of_the_day);
        // 20240309 % 3 == 2 -> third entry in catalog order
        assert_eq!(all.zone_of_the_day.map(|z| z.id), Some(2));
    }

    #[test]
    fn test_loading_has_no_pick() {
        let view = render(&CatalogState::Loading, "", today());
        assert_eq!(view.gallery, Gallery::Loading);
        assert!(view.zone_of_the_day.is_none());
    }
}
