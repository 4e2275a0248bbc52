use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::daily;
use crate::popularity::PopularityIndex;

/// Id of the pinned entry that is always listed first.
pub const SENTINEL_ID: i64 = -1;

/// One catalog entry as it appears in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneRecord {
    pub id: i64,
    pub name: String,
    /// Cover image location, may carry `{COVER_URL}` / `{HTML_URL}` tokens.
    #[serde(rename = "cover", default)]
    pub cover_template: String,
    /// Content location: a templated path, or an absolute `http(s)://`
    /// address for entries that redirect instead of embedding.
    #[serde(rename = "url")]
    pub content_template: String,
}

impl ZoneRecord {
    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID
    }
}

/// Ordering applied to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Id,
    #[serde(alias = "popular")]
    Popularity,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Id,
            Self::Id => Self::Popularity,
            Self::Popularity => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Popularity,
            Self::Id => Self::Name,
            Self::Popularity => Self::Id,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Id => "id",
            Self::Popularity => "popularity",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "id" => Some(Self::Id),
            "popularity" | "popular" => Some(Self::Popularity),
            _ => None,
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown sort key '{}' (name|id|popularity)", s))
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The loaded catalog: every record in its current display order, together
/// with the popularity counts used by [`SortKey::Popularity`].
///
/// Records are never edited after load. Sorting replaces the whole order;
/// filtering only ever produces a borrowed view.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    zones: Vec<ZoneRecord>,
    popularity: PopularityIndex,
    sort_key: Option<SortKey>,
}

impl Catalog {
    /// Build a catalog in manifest order. Records repeating an id already
    /// seen are dropped so that ids stay unique.
    pub fn new(records: Vec<ZoneRecord>, popularity: PopularityIndex) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut zones = Vec::with_capacity(records.len());
        for record in records {
            if seen.insert(record.id) {
                zones.push(record);
            } else {
                tracing::warn!("manifest repeats zone id {}; keeping the first entry", record.id);
            }
        }
        Self {
            zones,
            popularity,
            sort_key: None,
        }
    }

    pub fn zones(&self) -> &[ZoneRecord] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// The key of the last ordering pass, `None` while still in manifest order.
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    pub fn popularity(&self) -> &PopularityIndex {
        &self.popularity
    }

    pub fn hits(&self, id: i64) -> u64 {
        self.popularity.hits(id)
    }

    pub fn find(&self, id: i64) -> Option<&ZoneRecord> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Reorder the whole catalog by `key`, then pin the sentinel entry first.
    pub fn sort_by(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self.zones.sort_by_cached_key(|z| name_key(&z.name)),
            SortKey::Id => self.zones.sort_by_key(|z| z.id),
            SortKey::Popularity => {
                let popularity = &self.popularity;
                self.zones
                    .sort_by(|a, b| popularity.hits(b.id).cmp(&popularity.hits(a.id)));
            }
        }
        pin_sentinel(&mut self.zones);
        self.sort_key = Some(key);
    }

    /// Records whose name contains `query` (case-insensitive), in catalog order.
    pub fn filter<'a>(&'a self, query: &str) -> Vec<&'a ZoneRecord> {
        let needle = query.to_lowercase();
        self.zones
            .iter()
            .filter(|z| name_contains(&z.name, &needle))
            .collect()
    }

    /// The highlighted entry for `date`, picked from the current order.
    pub fn zone_of_the_day(&self, date: NaiveDate) -> Option<&ZoneRecord> {
        daily::zone_of_the_day_index(date, self.zones.len()).and_then(|i| self.zones.get(i))
    }
}

/// Case-insensitive substring match on the zone name. An empty query
/// matches everything.
pub fn name_matches(record: &ZoneRecord, query: &str) -> bool {
    name_contains(&record.name, &query.to_lowercase())
}

fn name_contains(name: &str, lowered_query: &str) -> bool {
    lowered_query.is_empty() || name.to_lowercase().contains(lowered_query)
}

/// Sort key for the name ordering, compared level by level: letters with
/// accents and case removed, then accents, then case (lowercase first),
/// then the raw text so the order is total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NameKey {
    base: String,
    accented: String,
    uppercase: Vec<bool>,
    raw: String,
}

pub fn name_key(name: &str) -> NameKey {
    let lowered: String = name.nfc().collect::<String>().to_lowercase();
    let base = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    NameKey {
        base,
        accented: lowered,
        uppercase: name.chars().filter(|c| c.is_alphabetic()).map(char::is_uppercase).collect(),
        raw: name.to_string(),
    }
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    name_key(a).cmp(&name_key(b))
}

/// Stable pass moving the sentinel to the front without disturbing the
/// relative order of everything else.
fn pin_sentinel(zones: &mut [ZoneRecord]) {
    zones.sort_by_key(|z| !z.is_sentinel());
}
