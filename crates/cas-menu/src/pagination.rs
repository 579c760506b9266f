//! # Pagination Calculator
//!
//! Pure slice-bound arithmetic for paged USSD menus. No state, no I/O.
//! Pages are 1-indexed throughout the stack; `total_pages` is
//! `ceil(total_items / page_size)`.

/// Slice bounds and page count for one page of a paged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// The requested page, 1-indexed.
    pub page: u32,
    /// Index of the first item on this page (0-indexed, inclusive).
    pub start: usize,
    /// Index one past the last item on this page (0-indexed, exclusive,
    /// clamped to `total_items`).
    pub end: usize,
    /// Total number of pages. Zero items yields zero pages.
    pub total_pages: u32,
    /// Total number of items across all pages.
    pub total_items: usize,
}

impl Pagination {
    /// Compute slice bounds for `page` over `total_items` items.
    ///
    /// A `page` of 0 is treated as 1 — pages are 1-indexed and the store
    /// never persists 0, but the calculator stays total over all inputs.
    /// A page past the end yields an empty slice, not a panic.
    pub fn new(page: u32, page_size: usize, total_items: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size) as u32;
        let start = (page as usize - 1).saturating_mul(page_size).min(total_items);
        let end = start.saturating_add(page_size).min(total_items);
        Self {
            page,
            start,
            end,
            total_pages,
            total_items,
        }
    }

    /// Whether a further page exists after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether this page is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn eight_items_page_size_five_is_two_pages() {
        let p1 = Pagination::new(1, 5, 8);
        assert_eq!((p1.start, p1.end), (0, 5));
        assert_eq!(p1.total_pages, 2);
        assert!(p1.has_next());

        let p2 = Pagination::new(2, 5, 8);
        assert_eq!((p2.start, p2.end), (5, 8));
        assert_eq!(p2.len(), 3);
        assert!(!p2.has_next());
    }

    #[test]
    fn page_past_end_is_empty_not_panicking() {
        let p = Pagination::new(9, 5, 8);
        assert!(p.is_empty());
        assert_eq!((p.start, p.end), (8, 8));
    }

    #[test]
    fn zero_items_zero_pages() {
        let p = Pagination::new(1, 5, 0);
        assert_eq!(p.total_pages, 0);
        assert!(p.is_empty());
        assert!(!p.has_next());
    }

    #[test]
    fn page_zero_treated_as_one() {
        assert_eq!(Pagination::new(0, 5, 8), Pagination::new(1, 5, 8));
    }

    proptest! {
        /// Page p holds exactly min(page_size, total - (p-1)*page_size) items
        /// (clamped at zero), and has_next iff p < ceil(total/page_size).
        #[test]
        fn page_length_and_next_control(
            page in 1u32..20,
            page_size in 1usize..10,
            total in 0usize..100,
        ) {
            let p = Pagination::new(page, page_size, total);
            let consumed = (page as usize - 1).saturating_mul(page_size);
            let expected = page_size.min(total.saturating_sub(consumed));
            prop_assert_eq!(p.len(), expected);
            prop_assert_eq!(p.has_next(), (page as usize) < total.div_ceil(page_size));
        }

        /// Concatenating every page in order reconstructs the full range.
        #[test]
        fn pages_tile_the_range(page_size in 1usize..10, total in 0usize..100) {
            let total_pages = total.div_ceil(page_size) as u32;
            let mut covered = Vec::new();
            for page in 1..=total_pages.max(1) {
                let p = Pagination::new(page, page_size, total);
                covered.extend(p.start..p.end);
            }
            prop_assert_eq!(covered, (0..total).collect::<Vec<_>>());
        }
    }
}
