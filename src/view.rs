//! Per-view state for the dashboard and the list screens.
//!
//! Each view owns its fetched collection plus the query and page it is
//! showing. Changing the query recomputes the filtered set and sends the
//! view back to page 1, so a page number is never carried over onto a
//! smaller result set.

use core::num::NonZeroUsize;

use crate::error::Result;
use crate::models::Payment;
use crate::paginate::{Page, Pager, total_pages};
use crate::query::{self, Filterable, Query};
use crate::stats::{self, DailyTotal, Summary};

/// Searchable, filterable, paginated list of records.
#[derive(Debug, Clone)]
pub struct ListView<T: Filterable> {
    /// Full collection as fetched.
    items: Vec<T>,
    /// Active search term and filters.
    query: Query<T::Field>,
    /// Indices into `items` of the records matching `query`, ascending.
    matches: Vec<usize>,
    /// Page state over `matches`.
    pager: Pager,
}

impl<T: Filterable> ListView<T> {
    /// Creates a view over `items` with an empty query, on page 1.
    #[inline]
    #[must_use]
    pub fn new(items: Vec<T>, page_size: NonZeroUsize) -> Self {
        Self {
            matches: (0..items.len()).collect(),
            items,
            query: Query::new(),
            pager: Pager::new(page_size),
        }
    }

    /// Returns the full, unfiltered collection.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the active query.
    #[inline]
    #[must_use]
    pub const fn query(&self) -> &Query<T::Field> {
        &self.query
    }

    /// Returns the records matching the active query, in input order.
    #[inline]
    pub fn filtered(&self) -> impl Iterator<Item = &T> {
        self.resolve(&self.matches)
    }

    /// Returns the number of records matching the active query.
    #[inline]
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.matches.len()
    }

    /// Returns the current page number.
    #[inline]
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.pager.current()
    }

    /// Returns the number of pages in the filtered set.
    #[inline]
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.matches.len(), self.pager.page_size())
    }

    /// Returns the current page of the filtered set.
    #[inline]
    #[must_use]
    pub fn page(&self) -> Page<Vec<&T>> {
        self.pager
            .page(&self.matches)
            .map_items(|indices| self.resolve(indices).collect())
    }

    /// Replaces the search term and returns to page 1.
    #[inline]
    pub fn set_term<S: Into<String>>(&mut self, term: S) {
        self.query.set_term(term);
        self.refilter();
    }

    /// Sets or clears one field filter and returns to page 1.
    #[inline]
    pub fn set_filter(&mut self, field: T::Field, value: Option<String>) {
        self.query.set_filter(field, value);
        self.refilter();
    }

    /// Replaces the whole query and returns to page 1.
    #[inline]
    pub fn set_query(&mut self, query: Query<T::Field>) {
        self.query = query;
        self.refilter();
    }

    /// Changes the page size and returns to page 1.
    #[inline]
    pub const fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.pager.set_page_size(page_size);
    }

    /// Swaps in a freshly fetched collection and returns to page 1.
    #[inline]
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refilter();
    }

    /// Moves to `page` if it exists; returns `true` if the page changed state.
    #[inline]
    pub fn go_to(&mut self, page: usize) -> bool {
        let total = self.total_pages();
        self.pager.go_to(page, total)
    }

    /// Moves to the next page if there is one.
    #[inline]
    pub fn next_page(&mut self) -> bool {
        let total = self.total_pages();
        self.pager.next(total)
    }

    /// Moves to the previous page if there is one.
    #[inline]
    pub fn previous_page(&mut self) -> bool {
        let total = self.total_pages();
        self.pager.previous(total)
    }

    /// Maps indices from `matches` back to records.
    fn resolve<'view>(
        &'view self,
        indices: &'view [usize],
    ) -> impl Iterator<Item = &'view T> {
        indices.iter().filter_map(|&index| self.items.get(index))
    }

    /// Recomputes the matching indices and resets the pager.
    fn refilter(&mut self) {
        self.matches = query::positions(&self.items, &self.query);
        self.pager.reset();
        tracing::trace!(
            total = self.items.len(),
            matched = self.matches.len(),
            "query applied"
        );
    }
}

/// Everything the dashboard renders, derived from the full payment list.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    /// Headline statistics.
    pub summary: Summary,
    /// Successful volume per date, ascending.
    pub daily: Vec<DailyTotal>,
    /// Most recent payments, newest first.
    pub recent: Vec<Payment>,
}

impl Overview {
    /// Derives the dashboard data from `payments`, keeping the `recent`
    /// newest payments.
    #[inline]
    #[must_use]
    pub fn from_payments(payments: &[Payment], recent: usize) -> Self {
        Self {
            summary: stats::summarize(payments),
            daily: stats::bucket_by_date(payments),
            recent: stats::most_recent(payments, recent)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

/// Unwraps a fetched collection, falling back to an empty one on failure.
///
/// The error is logged; the view then renders its empty state.
#[inline]
#[must_use]
pub fn collect_or_empty<T>(fetched: Result<Vec<T>>, what: &str) -> Vec<T> {
    fetched.unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to fetch {what}");
        Vec::new()
    })
}
