//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for persons, categories and
//! transactions.

pub mod category;
pub mod person;
pub mod transaction;

pub use category::{format_category_details, format_category_list};
pub use person::{format_person_details, format_person_list};
pub use transaction::{format_transaction_details, format_transaction_list};

use crate::services::Page;

/// Truncate to at most `max_chars` characters, marking the cut with `…`
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// "Page 2 of 5 (47 total)" line printed under paged listings
pub fn format_page_footer<T>(page: &Page<T>) -> String {
    let mut footer = format!(
        "Page {} of {} ({} total)",
        page.page_number,
        page.total_pages().max(1),
        page.total_count
    );

    if page.has_next_page() {
        footer.push_str(&format!(" - next: --page {}", page.page_number + 1));
    }

    footer
}
