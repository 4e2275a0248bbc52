use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Hit counts per zone id. Ids that were never reported count as zero, so a
/// lookup never fails even when the statistics could not be fetched at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopularityIndex {
    hits: HashMap<i64, u64>,
}

/// One row of the file statistics endpoint.
#[derive(Debug, Deserialize)]
pub struct FileStats {
    pub name: String,
    #[serde(default)]
    pub hits: FileHits,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileHits {
    #[serde(default)]
    pub total: u64,
}

fn zone_file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/(\d+)\.html$").expect("zone file pattern compiles"))
}

/// Zone id encoded in a statistics file path such as `/123.html`.
pub fn zone_id_from_path(path: &str) -> Option<i64> {
    zone_file_pattern()
        .captures(path)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

impl PopularityIndex {
    pub fn hits(&self, id: i64) -> u64 {
        self.hits.get(&id).copied().unwrap_or(0)
    }

    pub fn insert(&mut self, id: i64, hits: u64) {
        self.hits.insert(id, hits);
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Fold statistics rows into an index. Rows whose path does not name a
    /// zone document are skipped; a later row for the same id wins.
    pub fn from_stats(rows: impl IntoIterator<Item = FileStats>) -> Self {
        let mut index = Self::default();
        for row in rows {
            if let Some(id) = zone_id_from_path(&row.name) {
                index.insert(id, row.hits.total);
            }
        }
        index
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let rows: Vec<FileStats> = serde_json::from_str(json)?;
        Ok(Self::from_stats(rows))
    }
}
