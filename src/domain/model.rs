use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One catalog entry extracted from the source document.
///
/// `title` is the only required field; `rating` and `price` are `None` when the
/// source object carried no numeric literal for them, and an empty `genre`
/// counts as "absent" for frequency purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub platforms: Vec<String>,
    pub genre: String,
    pub rating: Option<f64>,
    pub price: Option<f64>,
}

/// Insertion-ordered frequency table.
///
/// `most_common` sorts by count descending; entries with equal counts keep
/// their first-seen order, so report ordering is deterministic for a given
/// input document.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn most_common(&self) -> Vec<(&str, usize)> {
        let mut items: Vec<(&str, usize)> =
            self.entries.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        // Stable sort: ties stay in insertion order.
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items
    }
}

/// Minimum and maximum over the present prices. Only exists when at least one
/// record carries a price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Aggregate statistics derived from one catalog. Recomputed on every run,
/// never persisted.
#[derive(Debug, Clone)]
pub struct CatalogStats {
    pub total: usize,
    pub unique_titles: usize,
    /// Titles occurring more than once, each listed once, sorted.
    pub duplicate_titles: Vec<String>,
    pub platform_counts: Counter,
    pub genre_counts: Counter,
    /// 0.0 when no record carries a rating.
    pub mean_rating: f64,
    /// 0.0 when no record carries a price.
    pub mean_price: f64,
    pub price_range: Option<PriceRange>,
    /// Records whose price is present and exactly zero.
    pub free_count: usize,
    /// Rated records, best first, at most five. Ties keep catalog order.
    pub top_rated: Vec<Record>,
}

/// Output of the transform stage: the catalog, its statistics and the rendered
/// report text, handed as one bundle to the load stage.
#[derive(Debug, Clone)]
pub struct ReportResult {
    pub records: Vec<Record>,
    pub stats: CatalogStats,
    pub report: String,
}
