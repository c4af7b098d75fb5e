//! Fixed-size, 1-indexed pagination over a filtered collection.

use core::num::NonZeroUsize;

/// One page of a collection.
///
/// `I` is the page's records: a borrowed slice from [`paginate`], or the
/// resolved references a [`ListView`](crate::view::ListView) hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<I> {
    /// Records on this page; empty when the page is out of range.
    pub items: I,
    /// Requested page number (1-indexed).
    pub number: usize,
    /// Number of pages in the collection; `0` for an empty collection.
    pub total_pages: usize,
    /// Number of records in the collection.
    pub total_items: usize,
}

impl<I> Page<I> {
    /// Returns `true` if a previous page exists.
    #[inline]
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1 && self.number <= self.total_pages
    }

    /// Returns `true` if a following page exists.
    #[inline]
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number >= 1 && self.number < self.total_pages
    }

    /// Returns `true` if page navigation is worth showing (more than one
    /// page).
    #[inline]
    #[must_use]
    pub const fn needs_navigation(&self) -> bool {
        self.total_pages > 1
    }

    /// Transforms the records while keeping the page position.
    #[inline]
    #[must_use]
    pub fn map_items<J, F: FnOnce(I) -> J>(self, transform: F) -> Page<J> {
        Page {
            items: transform(self.items),
            number: self.number,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

/// Number of pages needed for `len` records.
#[inline]
#[must_use]
pub const fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Returns page `page` (1-indexed) of `items`.
///
/// Pages past the end (and page `0`) yield an empty slice rather than an
/// error.
#[inline]
#[must_use]
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> Page<&[T]> {
    let size = page_size.get();
    let slice = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(size))
        .and_then(|start| items.get(start..start.saturating_add(size).min(items.len())))
        .unwrap_or(&[]);
    Page {
        items: slice,
        number: page,
        total_pages: total_pages(items.len(), page_size),
        total_items: items.len(),
    }
}

/// Current-page state for one list view.
///
/// Navigation only moves to pages within `[1, total_pages]`; anything else
/// is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Records per page.
    page_size: NonZeroUsize,
    /// Current page (1-indexed).
    current: usize,
}

impl Pager {
    /// Creates a pager positioned on page 1.
    #[inline]
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            current: 1,
        }
    }

    /// Returns the current page number.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Returns the page size.
    #[inline]
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Moves to `target` if it lies in `[1, total_pages]`.
    ///
    /// Returns `true` if the page changed state.
    #[inline]
    pub fn go_to(&mut self, target: usize, total_pages: usize) -> bool {
        if (1..=total_pages).contains(&target) {
            self.current = target;
            true
        } else {
            tracing::trace!(requested = target, total_pages, "ignoring out-of-range page request");
            false
        }
    }

    /// Moves to the next page if there is one.
    #[inline]
    pub fn next(&mut self, total_pages: usize) -> bool {
        self.go_to(self.current.saturating_add(1), total_pages)
    }

    /// Moves to the previous page if there is one.
    #[inline]
    pub fn previous(&mut self, total_pages: usize) -> bool {
        self.go_to(self.current.saturating_sub(1), total_pages)
    }

    /// Returns to page 1.
    #[inline]
    pub const fn reset(&mut self) {
        self.current = 1;
    }

    /// Changes the page size and returns to page 1.
    #[inline]
    pub const fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.current = 1;
    }

    /// Slices the current page out of `items`.
    #[inline]
    #[must_use]
    pub fn page<'items, T>(&self, items: &'items [T]) -> Page<&'items [T]> {
        paginate(items, self.page_size, self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, size(10)), 0);
        assert_eq!(total_pages(1, size(10)), 1);
        assert_eq!(total_pages(10, size(10)), 1);
        assert_eq!(total_pages(11, size(10)), 2);
    }

    #[test]
    fn slices_contiguous_pages() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&items, size(3), 1).items, [1, 2, 3]);
        assert_eq!(paginate(&items, size(3), 2).items, [4, 5, 6]);
        assert_eq!(paginate(&items, size(3), 3).items, [7]);
        assert_eq!(paginate(&items, size(3), 3).total_pages, 3);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<u32> = (1..=4).collect();
        let past = paginate(&items, size(2), 3);
        assert!(past.items.is_empty());
        assert_eq!(past.total_pages, 2);
        assert!(paginate(&items, size(2), 0).items.is_empty());
        assert!(paginate(&items, size(2), usize::MAX).items.is_empty());
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, size(5), 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.needs_navigation());
    }

    #[test]
    fn pages_concatenate_to_input() {
        let items: Vec<u32> = (0..23).collect();
        for page_size in 1..=25 {
            let total = total_pages(items.len(), size(page_size));
            let rebuilt: Vec<u32> = (1..=total)
                .flat_map(|n| paginate(&items, size(page_size), n).items.iter().copied())
                .collect();
            assert_eq!(rebuilt, items, "page size {page_size}");
        }
    }

    #[test]
    fn page_neighbours() {
        let items: Vec<u32> = (1..=5).collect();
        let first = paginate(&items, size(2), 1);
        assert!(!first.has_previous());
        assert!(first.has_next());
        let last = paginate(&items, size(2), 3);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn mapping_items_keeps_position() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, size(2), 2).map_items(|slice| slice.iter().sum::<u32>());
        assert_eq!(page.items, 7);
        assert_eq!(page.number, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 5);
    }

    #[test]
    fn pager_ignores_out_of_range_navigation() {
        let mut pager = Pager::new(size(10));
        assert!(!pager.go_to(0, 3));
        assert!(!pager.go_to(4, 3));
        assert_eq!(pager.current(), 1);
        assert!(pager.go_to(3, 3));
        assert_eq!(pager.current(), 3);
        assert!(!pager.next(3));
        assert_eq!(pager.current(), 3);
        assert!(pager.previous(3));
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn pager_previous_on_first_page_is_noop() {
        let mut pager = Pager::new(size(10));
        assert!(!pager.previous(5));
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn pager_with_no_pages_never_moves() {
        let mut pager = Pager::new(size(10));
        assert!(!pager.go_to(1, 0));
        assert!(!pager.next(0));
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn changing_page_size_resets() {
        let mut pager = Pager::new(size(2));
        assert!(pager.go_to(4, 5));
        pager.set_page_size(size(5));
        assert_eq!(pager.current(), 1);
        assert_eq!(pager.page_size().get(), 5);
    }
}
