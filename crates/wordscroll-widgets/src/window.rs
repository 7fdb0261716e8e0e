//! Filter-then-window computation behind [`VirtualList`](crate::virtual_list::VirtualList).
//!
//! Everything here is a pure function of `(items, query, scroll_offset)`:
//!
//! 1. keep the items whose lowercase form contains the lowercase query,
//!    preserving source order;
//! 2. translate the scroll offset into a row index,
//!    `start = floor(offset / item_height)`, and cap the window at
//!    `max_items` rows or the end of the filtered sequence;
//! 3. slice `[start, end)` out of the filtered sequence.
//!
//! Rows have a uniform height. A scroll offset that points past the end of
//! the filtered sequence yields an empty window rather than being clamped
//! back, so narrowing the query while scrolled far down can leave nothing
//! on screen until the user scrolls again.

use std::ops::Range;

/// Height of one row in scroll units.
pub const ITEM_HEIGHT: u32 = 40;

/// Upper bound on rows in one window.
pub const MAX_ITEMS: usize = 2500;

/// Geometry of the window computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Scroll units per row. Zero is treated as one.
    pub item_height: u32,
    /// Maximum number of rows in a window.
    pub max_items: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            item_height: ITEM_HEIGHT,
            max_items: MAX_ITEMS,
        }
    }
}

impl WindowConfig {
    /// Set the row height in scroll units.
    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = item_height;
        self
    }

    /// Set the maximum window length.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Row height actually used for division.
    pub fn row_height(&self) -> u64 {
        u64::from(self.item_height.max(1))
    }

    /// Scroll offset at which row `index` becomes the first row.
    pub fn offset_of(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.row_height())
    }
}

/// The contiguous index range `[start, end)` of the filtered sequence that is
/// currently rendered. Always `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VisibleRange {
    /// First rendered index.
    pub start: usize,
    /// One past the last rendered index.
    pub end: usize,
}

impl VisibleRange {
    /// Number of rows in the window.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The window as a slice range.
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Case-insensitive substring predicate. The empty query matches everything.
pub fn matches(item: &str, query: &str) -> bool {
    contains_lowered(item, &query.to_lowercase())
}

fn contains_lowered(item: &str, needle: &str) -> bool {
    needle.is_empty() || item.to_lowercase().contains(needle)
}

/// Items matching `query`, in source order.
pub fn filter_items<'a, S: AsRef<str>>(items: &'a [S], query: &str) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    items
        .iter()
        .map(|item| item.as_ref())
        .filter(|item| contains_lowered(item, &needle))
        .collect()
}

/// Source indices of the items matching `query`, in source order.
pub fn filter_indices<S: AsRef<str>>(items: &[S], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| contains_lowered(item.as_ref(), &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Window over a filtered sequence of `filtered_count` items.
///
/// When the offset points at or beyond the end, the window is empty and
/// `start` is pulled back to `filtered_count` so the range stays valid.
pub fn visible_range(scroll_offset: u64, filtered_count: usize, config: &WindowConfig) -> VisibleRange {
    let row = scroll_offset / config.row_height();
    let start = usize::try_from(row).unwrap_or(usize::MAX);
    if start >= filtered_count {
        return VisibleRange {
            start: filtered_count,
            end: filtered_count,
        };
    }
    let end = start.saturating_add(config.max_items).min(filtered_count);
    VisibleRange { start, end }
}

/// The strings to render for `(items, query, scroll_offset)`.
pub fn compute_window<'a, S: AsRef<str>>(
    items: &'a [S],
    query: &str,
    scroll_offset: u64,
    config: &WindowConfig,
) -> Vec<&'a str> {
    let filtered = filter_items(items, query);
    let range = visible_range(scroll_offset, filtered.len(), config);
    filtered[range.as_range()].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i:05}")).collect()
    }

    #[test]
    fn defaults_match_row_geometry() {
        let config = WindowConfig::default();
        assert_eq!(config.item_height, 40);
        assert_eq!(config.max_items, 2500);
        assert_eq!(config.offset_of(100), 4000);
    }

    #[test]
    fn filter_keeps_substring_matches_in_order() {
        let items = ["apple", "banana", "grape"];
        assert_eq!(filter_items(&items, "an"), vec!["banana"]);
        assert_eq!(filter_items(&items, "AP"), vec!["apple", "grape"]);
        assert_eq!(filter_items(&items, ""), vec!["apple", "banana", "grape"]);
        assert!(filter_items(&items, "kiwi").is_empty());
    }

    #[test]
    fn matches_ignores_case() {
        assert!(matches("Banana", "NAN"));
        assert!(matches("anything", ""));
        assert!(!matches("apple", "pear"));
    }

    #[test]
    fn indices_follow_source_positions() {
        let items = vec!["apple".to_string(), "banana".to_string(), "grape".to_string()];
        assert_eq!(filter_indices(&items, "ap"), vec![0, 2]);
        assert_eq!(filter_indices(&items, ""), vec![0, 1, 2]);
    }

    #[test]
    fn filter_keeps_duplicates() {
        let items = ["Tea", "tea", "TEA", "coffee"];
        assert_eq!(filter_items(&items, "tea"), vec!["Tea", "tea", "TEA"]);
    }

    #[test]
    fn small_list_scenario() {
        let items = ["apple", "banana", "grape"];
        let window = compute_window(&items, "an", 0, &WindowConfig::default());
        assert_eq!(window, vec!["banana"]);
    }

    #[test]
    fn large_list_scenario() {
        let items = numbered(10_000);
        let config = WindowConfig::default();
        let range = visible_range(4000, items.len(), &config);
        assert_eq!(range, VisibleRange { start: 100, end: 2600 });

        let window = compute_window(&items, "", 4000, &config);
        assert_eq!(window.len(), 2500);
        assert_eq!(window.first().copied(), Some("word00100"));
        assert_eq!(window.last().copied(), Some("word02599"));
    }

    #[test]
    fn empty_source_gives_empty_window() {
        let items: [&str; 0] = [];
        for offset in [0, 39, 40, 1_000_000] {
            let window = compute_window(&items, "anything", offset, &WindowConfig::default());
            assert!(window.is_empty());
        }
        assert!(visible_range(0, 0, &WindowConfig::default()).is_empty());
    }

    #[test]
    fn partial_row_offsets_round_down() {
        let config = WindowConfig::default();
        assert_eq!(visible_range(39, 10, &config).start, 0);
        assert_eq!(visible_range(40, 10, &config).start, 1);
        assert_eq!(visible_range(79, 10, &config).start, 1);
    }

    #[test]
    fn tail_window_is_shorter_than_max() {
        let config = WindowConfig::default().with_max_items(5);
        let range = visible_range(config.offset_of(8), 10, &config);
        assert_eq!(range, VisibleRange { start: 8, end: 10 });
        assert_eq!(range.len(), 2);
    }

    #[test]
    fn offset_past_narrowed_filter_is_empty() {
        // Scrolled to row 500 of the full list, then the query narrows it to one match.
        let items = numbered(1000);
        let config = WindowConfig::default();
        let offset = config.offset_of(500);
        assert_eq!(compute_window(&items, "", offset, &config).len(), 500);
        assert!(compute_window(&items, "word00007", offset, &config).is_empty());
    }

    #[test]
    fn zero_item_height_is_treated_as_one() {
        let config = WindowConfig::default().with_item_height(0);
        assert_eq!(visible_range(3, 10, &config).start, 3);
    }

    #[test]
    fn huge_offset_does_not_overflow() {
        let range = visible_range(u64::MAX, 10, &WindowConfig::default().with_item_height(1));
        assert_eq!(range, VisibleRange { start: 10, end: 10 });
    }

    proptest! {
        #[test]
        fn prop_filter_partitions_source(
            items in prop::collection::vec("[a-zA-Z]{0,8}", 0..40),
            query in "[a-zA-Z]{0,3}",
        ) {
            let filtered = filter_items(&items, &query);
            let needle = query.to_lowercase();
            for item in &filtered {
                prop_assert!(item.to_lowercase().contains(&needle));
            }
            let kept = items.iter().filter(|i| i.to_lowercase().contains(&needle)).count();
            prop_assert_eq!(kept, filtered.len());
        }

        #[test]
        fn prop_window_length_formula(
            offset in 0u64..200_000,
            filtered_len in 0usize..6000,
        ) {
            let config = WindowConfig::default();
            let range = visible_range(offset, filtered_len, &config);
            let start = (offset / 40) as usize;
            let expected = if start < filtered_len {
                MAX_ITEMS.min(filtered_len - start)
            } else {
                0
            };
            prop_assert_eq!(range.len(), expected);
            prop_assert!(range.start <= range.end);
            prop_assert!(range.end <= filtered_len);
            if start < filtered_len {
                prop_assert_eq!(range.start, start);
            }
        }

        #[test]
        fn prop_compute_window_is_idempotent(
            items in prop::collection::vec("[a-c]{1,4}", 0..60),
            query in "[a-c]{0,2}",
            offset in 0u64..3000,
        ) {
            let config = WindowConfig::default().with_max_items(7);
            let first = compute_window(&items, &query, offset, &config);
            let second = compute_window(&items, &query, offset, &config);
            prop_assert_eq!(first, second);
        }
    }
}
