//! Catalog pagination and name filtering.
//!
//! The backend list endpoints take `skip`/`limit` and return a bare array
//! with no total count, so the total is estimated from the size of the last
//! page fetched:
//!
//! | Last page size      | Estimated total                 |
//! |---------------------|---------------------------------|
//! | `< page_size`       | `offset + count` (exact)        |
//! | `== page_size`      | `offset + count + page_size`    |
//!
//! The second case over-estimates by one page so that "next" stays enabled
//! until a short page proves the end has been reached.

use crate::models::Product;

/// Position of one fetched page within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    /// Number of items the backend returned for this page.
    pub count: u32,
}

impl PageWindow {
    /// A window for `page` before anything has been fetched.
    ///
    /// Page numbers below 1 are clamped to 1.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size,
            count: 0,
        }
    }

    /// Record how many items the backend returned for this page.
    #[must_use]
    pub fn with_count(self, count: usize) -> Self {
        Self {
            count: u32::try_from(count).unwrap_or(u32::MAX),
            ..self
        }
    }

    /// The `skip` query parameter for this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// The `limit` query parameter for this page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.page_size
    }

    /// Estimated total number of items in the catalog.
    #[must_use]
    pub fn estimated_total(&self) -> u64 {
        let seen = self.offset() + u64::from(self.count);
        if self.count < self.page_size {
            seen
        } else {
            seen + u64::from(self.page_size)
        }
    }

    /// Estimated number of pages, never less than the current page.
    #[must_use]
    pub fn estimated_pages(&self) -> u64 {
        if self.page_size == 0 {
            return u64::from(self.page);
        }
        self.estimated_total()
            .div_ceil(u64::from(self.page_size))
            .max(u64::from(self.page))
    }

    /// `false` whenever the last page came back short.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page_size > 0 && self.count >= self.page_size
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Case-insensitive substring filter over product names.
///
/// Only filters what is passed in, which for the catalog browser is the
/// currently loaded page. A blank term keeps everything.
#[must_use]
pub fn filter_by_name<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return products.iter().collect();
    }
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: Decimal::ONE,
            stock: 1,
            category_id: 1,
        }
    }

    #[test]
    fn offset_is_zero_on_first_page() {
        let window = PageWindow::new(1, 12);
        assert_eq!(window.offset(), 0);
        assert_eq!(window.limit(), 12);
    }

    #[test]
    fn page_zero_is_clamped_to_one() {
        assert_eq!(PageWindow::new(0, 12).page, 1);
    }

    #[test]
    fn offset_advances_by_page_size() {
        assert_eq!(PageWindow::new(3, 12).offset(), 24);
    }

    #[test]
    fn short_page_gives_exact_total_and_disables_next() {
        let window = PageWindow::new(2, 10).with_count(4);
        assert_eq!(window.estimated_total(), 14);
        assert_eq!(window.estimated_pages(), 2);
        assert!(!window.has_next());
        assert!(window.has_previous());
    }

    #[test]
    fn full_page_overestimates_by_one_page() {
        let window = PageWindow::new(1, 10).with_count(10);
        assert_eq!(window.estimated_total(), 20);
        assert_eq!(window.estimated_pages(), 2);
        assert!(window.has_next());
        assert!(!window.has_previous());
    }

    #[test]
    fn empty_page_disables_next() {
        let window = PageWindow::new(5, 10).with_count(0);
        assert!(!window.has_next());
        assert_eq!(window.estimated_total(), 40);
        assert_eq!(window.estimated_pages(), 5);
    }

    #[test]
    fn next_disabled_for_every_short_count() {
        for count in 0..10 {
            assert!(!PageWindow::new(1, 10).with_count(count).has_next());
        }
    }

    #[test]
    fn filter_matches_case_insensitive_substring() {
        let products = vec![product(1, "Green Tea"), product(2, "Coffee"), product(3, "Iced TEA")];
        let hits: Vec<i64> = filter_by_name(&products, "tea").iter().map(|p| p.id).collect();
        assert_eq!(hits, vec![1, 3]);
    }

    #[test]
    fn blank_filter_keeps_everything() {
        let products = vec![product(1, "Green Tea"), product(2, "Coffee")];
        assert_eq!(filter_by_name(&products, "   ").len(), 2);
    }
}
