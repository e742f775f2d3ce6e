use crate::domain::model::{CatalogStats, Counter};
use chrono::NaiveDate;

const NO_RECORDS_MESSAGE: &str = "# Catalog report\n\nNo games found in the source document.\n";

/// Renders the markdown report for one catalog.
///
/// The section order is fixed; the only variable input besides the stats is
/// the injected date. An empty catalog collapses the whole report to a single
/// fixed message.
pub fn render(stats: &CatalogStats, date: NaiveDate) -> String {
    if stats.total == 0 {
        return NO_RECORDS_MESSAGE.to_string();
    }

    let mut lines: Vec<String> = vec![
        "# Catalog report".to_string(),
        String::new(),
        format!("Date: {}", date.format("%Y-%m-%d")),
        String::new(),
        format!("Total games: {}", stats.total),
        format!("Unique titles: {}", stats.unique_titles),
        format!("Duplicates: {}", stats.duplicate_titles.len()),
        String::new(),
        "## Platform distribution".to_string(),
    ];
    push_counter(&mut lines, &stats.platform_counts);

    lines.push(String::new());
    lines.push("## Genre distribution".to_string());
    push_counter(&mut lines, &stats.genre_counts);

    lines.push(String::new());
    lines.push("## Prices and ratings".to_string());
    lines.push(format!("- Average rating: {:.2}", stats.mean_rating));
    lines.push(format!("- Average price: €{:.2}", stats.mean_price));
    // Min/max only exist when at least one price was found.
    if let Some(range) = &stats.price_range {
        lines.push(format!("- Minimum price: €{:.2}", range.min));
        lines.push(format!("- Maximum price: €{:.2}", range.max));
    }
    lines.push(format!("- Free-to-play games: {}", stats.free_count));

    lines.push(String::new());
    lines.push("## Top 5 by rating".to_string());
    for record in &stats.top_rated {
        if let Some(rating) = record.rating {
            lines.push(format!("- {} ({:.1} ★)", record.title, rating));
        }
    }

    if !stats.duplicate_titles.is_empty() {
        lines.push(String::new());
        lines.push("## Duplicate titles".to_string());
        for title in &stats.duplicate_titles {
            lines.push(format!("- {}", title));
        }
    }

    lines.join("\n") + "\n"
}

fn push_counter(lines: &mut Vec<String>, counter: &Counter) {
    for (key, count) in counter.most_common() {
        lines.push(format!("- {}: {}", key, count));
    }
}
