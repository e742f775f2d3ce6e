use crate::domain::model::{CatalogStats, Counter, PriceRange, Record};

/// Computes the aggregate statistics for one catalog.
///
/// Pure and deterministic: the same records always produce the same stats.
/// Records missing a rating or price simply do not contribute to the
/// corresponding figures.
pub fn aggregate(records: &[Record]) -> CatalogStats {
    let mut title_counts = Counter::new();
    let mut platform_counts = Counter::new();
    let mut genre_counts = Counter::new();

    for record in records {
        title_counts.add(&record.title);
        for platform in &record.platforms {
            platform_counts.add(platform);
        }
        if !record.genre.is_empty() {
            genre_counts.add(&record.genre);
        }
    }

    let mut duplicate_titles: Vec<String> = title_counts
        .iter()
        .filter(|(_, count)| *count > 1)
        .map(|(title, _)| title.to_string())
        .collect();
    duplicate_titles.sort();

    let ratings: Vec<f64> = records.iter().filter_map(|r| r.rating).collect();
    let prices: Vec<f64> = records.iter().filter_map(|r| r.price).collect();

    let mean_rating = mean(&ratings);
    let mean_price = mean(&prices);

    let price_range = if prices.is_empty() {
        None
    } else {
        Some(PriceRange {
            min: prices.iter().copied().fold(f64::INFINITY, f64::min),
            max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    };

    // Exact zero marks a free entry.
    let free_count = prices.iter().filter(|p| **p == 0.0).count();

    let mut top_rated: Vec<Record> = records
        .iter()
        .filter(|r| r.rating.is_some())
        .cloned()
        .collect();
    // Stable sort keeps catalog order among equal ratings.
    top_rated.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_rated.truncate(5);

    CatalogStats {
        total: records.len(),
        unique_titles: title_counts.len(),
        duplicate_titles,
        platform_counts,
        genre_counts,
        mean_rating,
        mean_price,
        price_range,
        free_count,
        top_rated,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, platforms: &[&str], genre: &str, rating: Option<f64>, price: Option<f64>) -> Record {
        Record {
            title: title.to_string(),
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
            genre: genre.to_string(),
            rating,
            price,
        }
    }

    #[test]
    fn test_worked_example() {
        let records = vec![
            record("A", &["PC", "Mac"], "RPG", Some(4.5), Some(0.0)),
            record("A", &["PC"], "RPG", Some(3.0), Some(9.99)),
        ];

        let stats = aggregate(&records);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.unique_titles, 1);
        assert_eq!(stats.duplicate_titles, vec!["A"]);
        assert_eq!(stats.platform_counts.count("PC"), 2);
        assert_eq!(stats.platform_counts.count("Mac"), 1);
        assert_eq!(stats.genre_counts.count("RPG"), 2);
        assert_eq!(stats.mean_rating, 3.75);
        assert_eq!(stats.free_count, 1);

        let range = stats.price_range.unwrap();
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 9.99);
    }

    #[test]
    fn test_empty_catalog() {
        let stats = aggregate(&[]);

        assert_eq!(stats.total, 0);
        assert_eq!(stats.unique_titles, 0);
        assert!(stats.duplicate_titles.is_empty());
        assert!(stats.platform_counts.is_empty());
        assert_eq!(stats.mean_rating, 0.0);
        assert_eq!(stats.mean_price, 0.0);
        assert_eq!(stats.price_range, None);
        assert!(stats.top_rated.is_empty());
    }

    #[test]
    fn test_no_prices_leaves_range_undefined() {
        let records = vec![record("A", &[], "", Some(4.0), None)];

        let stats = aggregate(&records);
        assert_eq!(stats.mean_price, 0.0);
        assert_eq!(stats.price_range, None);
        assert_eq!(stats.free_count, 0);
    }

    #[test]
    fn test_unrated_records_do_not_affect_rating_stats() {
        let records = vec![
            record("Rated", &[], "", Some(4.0), None),
            record("Unrated", &[], "", None, Some(5.0)),
        ];

        let stats = aggregate(&records);
        assert_eq!(stats.mean_rating, 4.0);
        assert_eq!(stats.top_rated.len(), 1);
        assert_eq!(stats.top_rated[0].title, "Rated");
    }

    #[test]
    fn test_top_rated_is_truncated_and_stable() {
        let records = vec![
            record("One", &[], "", Some(3.0), None),
            record("Two", &[], "", Some(5.0), None),
            record("Three", &[], "", Some(4.0), None),
            record("Four", &[], "", Some(4.0), None),
            record("Five", &[], "", Some(2.0), None),
            record("Six", &[], "", Some(4.0), None),
            record("Seven", &[], "", Some(1.0), None),
        ];

        let stats = aggregate(&records);
        let titles: Vec<&str> = stats.top_rated.iter().map(|r| r.title.as_str()).collect();

        // Ties at 4.0 stay in catalog order.
        assert_eq!(titles, vec!["Two", "Three", "Four", "Six", "One"]);
    }

    #[test]
    fn test_duplicate_reconciliation() {
        let records = vec![
            record("A", &[], "", None, None),
            record("A", &[], "", None, None),
            record("A", &[], "", None, None),
            record("B", &[], "", None, None),
            record("B", &[], "", None, None),
            record("C", &[], "", None, None),
        ];

        let stats = aggregate(&records);

        // unique_titles == total - sum(count - 1 for each duplicated title)
        assert_eq!(stats.unique_titles, stats.total - (2 + 1));
        assert_eq!(stats.duplicate_titles, vec!["A", "B"]);
    }

    #[test]
    fn test_empty_genre_is_not_counted() {
        let records = vec![
            record("A", &[], "", None, None),
            record("B", &[], "RPG", None, None),
        ];

        let stats = aggregate(&records);
        assert_eq!(stats.genre_counts.len(), 1);
        assert_eq!(stats.genre_counts.count("RPG"), 1);
    }

    #[test]
    fn test_platform_repeats_within_record_all_count() {
        let records = vec![record("A", &["PC", "PC", "Mac"], "", None, None)];

        let stats = aggregate(&records);
        assert_eq!(stats.platform_counts.count("PC"), 2);
        assert_eq!(stats.platform_counts.count("Mac"), 1);
    }

    #[test]
    fn test_mean_price_within_range() {
        let records = vec![
            record("A", &[], "", None, Some(1.0)),
            record("B", &[], "", None, Some(3.0)),
            record("C", &[], "", None, Some(8.0)),
        ];

        let stats = aggregate(&records);
        let range = stats.price_range.unwrap();
        assert!(stats.mean_price >= range.min && stats.mean_price <= range.max);
        assert_eq!(stats.mean_price, 4.0);
    }

    #[test]
    fn test_counter_most_common_orders_ties_by_first_seen() {
        let mut counter = Counter::new();
        for key in ["switch", "pc", "mac", "pc", "mac", "ps5"] {
            counter.add(key);
        }

        let ordered: Vec<(&str, usize)> = counter.most_common();
        assert_eq!(
            ordered,
            vec![("pc", 2), ("mac", 2), ("switch", 1), ("ps5", 1)]
        );
    }
}
