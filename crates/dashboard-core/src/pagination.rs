//! 1-based page arithmetic
//!
//! Page size is a [`NonZeroUsize`]; the zero case has no meaning and cannot be
//! constructed. A page index past the end is not an error, it just selects
//! nothing.

use std::num::NonZeroUsize;

use serde::Serialize;

/// Number of pages needed to show `item_count` items. Zero items means zero pages.
pub fn total_pages(item_count: usize, page_size: NonZeroUsize) -> usize {
    item_count.div_ceil(page_size.get())
}

/// Half-open index range `[start, end)` of page `page_index` (1-based),
/// clamped to `item_count`. Page 0 and pages past the end are empty.
pub fn page_bounds(
    item_count: usize,
    page_size: NonZeroUsize,
    page_index: usize,
) -> (usize, usize) {
    if page_index == 0 {
        return (0, 0);
    }
    let size = page_size.get();
    let start = (page_index - 1).saturating_mul(size).min(item_count);
    let end = page_index.saturating_mul(size).min(item_count);
    (start, end)
}

/// The slice of `items` shown on page `page_index` (1-based)
pub fn page_slice<T>(items: &[T], page_size: NonZeroUsize, page_index: usize) -> &[T] {
    let (start, end) = page_bounds(items.len(), page_size, page_index);
    &items[start..end]
}

/// Footer data for the contract table: "Showing X to Y of Z" and the
/// state of the Previous/Next controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub current_page: usize,
    pub total_pages: usize,
    /// 1-based number of the first item on the page, 0 when the page is empty
    pub first_item: usize,
    /// 1-based number of the last item on the page, 0 when the page is empty
    pub last_item: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// The control is only rendered when there is more than one page
    pub show_controls: bool,
}

impl PageSummary {
    pub fn new(total_items: usize, page_size: NonZeroUsize, current_page: usize) -> Self {
        let total_pages = total_pages(total_items, page_size);
        let (start, end) = page_bounds(total_items, page_size, current_page);
        let (first_item, last_item) = if start < end { (start + 1, end) } else { (0, 0) };

        Self {
            current_page,
            total_pages,
            first_item,
            last_item,
            total_items,
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
            show_controls: total_pages > 1,
        }
    }

    /// Page buttons, `1..=total_pages`
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, size(10)), 0);
        assert_eq!(total_pages(1, size(10)), 1);
        assert_eq!(total_pages(10, size(10)), 1);
        assert_eq!(total_pages(11, size(10)), 2);
        assert_eq!(total_pages(25, size(10)), 3);
    }

    #[test]
    fn test_twenty_five_items_three_pages() {
        let items: Vec<u32> = (1..=25).collect();

        assert_eq!(page_slice(&items, size(10), 1).len(), 10);
        assert_eq!(page_slice(&items, size(10), 2), &items[10..20]);
        assert_eq!(page_slice(&items, size(10), 3), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items: Vec<u32> = (1..=25).collect();
        assert!(page_slice(&items, size(10), 4).is_empty());
        assert!(page_slice(&items, size(10), usize::MAX).is_empty());
        assert!(page_slice(&items, size(10), 0).is_empty());
    }

    #[test]
    fn test_summary_middle_page() {
        let summary = PageSummary::new(25, size(10), 2);
        assert_eq!(
            summary,
            PageSummary {
                current_page: 2,
                total_pages: 3,
                first_item: 11,
                last_item: 20,
                total_items: 25,
                has_previous: true,
                has_next: true,
                show_controls: true,
            }
        );
        assert_eq!(summary.page_numbers(), vec![1, 2, 3]);
    }

    #[test]
    fn test_summary_last_page_clamps_last_item() {
        let summary = PageSummary::new(25, size(10), 3);
        assert_eq!(summary.first_item, 21);
        assert_eq!(summary.last_item, 25);
        assert!(!summary.has_next);
    }

    #[test]
    fn test_summary_single_page_hides_controls() {
        let summary = PageSummary::new(7, size(10), 1);
        assert!(!summary.show_controls);
        assert!(!summary.has_previous);
        assert!(!summary.has_next);
    }

    #[test]
    fn test_summary_empty() {
        let summary = PageSummary::new(0, size(10), 1);
        assert_eq!(summary.total_pages, 0);
        assert_eq!((summary.first_item, summary.last_item), (0, 0));
        assert!(summary.page_numbers().is_empty());
    }
}
