//! Search and exact-match filtering over fetched collections.
//!
//! A [`Query`] combines a free-text term with any number of field filters.
//! All set criteria are combined: a record must satisfy every one of them
//! to pass. Blank terms and empty filter values are inactive and match
//! everything, so an empty query returns the collection unchanged.
//!
//! # Examples
//!
//! ```
//! use payops_rs::query::{PaymentField, Query};
//!
//! let query = Query::new()
//!     .term("cafe")
//!     .filter(PaymentField::Status, "SUCCESS")
//!     .filter(PaymentField::PayType, "");
//! assert_eq!(query.filter_value(PaymentField::Status), Some("SUCCESS"));
//! assert_eq!(query.filter_value(PaymentField::PayType), None);
//! ```

use alloc::collections::BTreeMap;

use crate::models::{Merchant, Payment};

/// A record that can be searched by text and filtered by field.
pub trait Filterable {
    /// Fields that accept exact-match filters.
    type Field: Copy + Ord + core::fmt::Debug;

    /// Returns the text fields the search term is matched against.
    fn search_fields(&self) -> impl Iterator<Item = &str>;

    /// Returns the code of `field` used for exact-match comparison.
    fn field_value(&self, field: Self::Field) -> &str;
}

/// Filterable fields of a [`Payment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentField {
    /// Payment status code.
    Status,
    /// Payment channel code.
    PayType,
    /// Originating merchant code.
    MerchantCode,
    /// Currency code.
    Currency,
}

/// Filterable fields of a [`Merchant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MerchantField {
    /// Merchant status code.
    Status,
    /// Business category code.
    BizType,
}

impl Filterable for Payment {
    type Field = PaymentField;

    #[inline]
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [self.payment_code.as_str(), self.merchant_code.as_str()].into_iter()
    }

    #[inline]
    fn field_value(&self, field: PaymentField) -> &str {
        match field {
            PaymentField::Status => self.status.code(),
            PaymentField::PayType => self.pay_type.code(),
            PaymentField::MerchantCode => self.merchant_code.as_str(),
            PaymentField::Currency => &self.currency,
        }
    }
}

impl Filterable for Merchant {
    type Field = MerchantField;

    #[inline]
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [self.merchant_name.as_str(), self.merchant_code.as_str()].into_iter()
    }

    #[inline]
    fn field_value(&self, field: MerchantField) -> &str {
        match field {
            MerchantField::Status => self.status.code(),
            MerchantField::BizType => self.biz_type.code(),
        }
    }
}

/// Composable search term plus field filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<F> {
    /// Free-text search term as entered.
    term: String,
    /// Active exact-match filters; never holds empty values.
    filters: BTreeMap<F, String>,
}

impl<F: Copy + Ord> Default for Query<F> {
    #[inline]
    fn default() -> Self {
        Self {
            term: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl<F: Copy + Ord> Query<F> {
    /// Creates an empty query that matches every record.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term (case-insensitive substring match).
    #[inline]
    #[must_use]
    pub fn term<T: Into<String>>(mut self, term: T) -> Self {
        self.set_term(term);
        self
    }

    /// Restricts `field` to exactly `value`. An empty or whitespace-only
    /// value clears the filter.
    #[inline]
    #[must_use]
    pub fn filter<T: Into<String>>(mut self, field: F, value: T) -> Self {
        self.set_filter(field, Some(value.into()));
        self
    }

    /// Removes the filter on `field`.
    #[inline]
    #[must_use]
    pub fn clear_filter(mut self, field: F) -> Self {
        self.set_filter(field, None);
        self
    }

    /// Replaces the search term in place.
    #[inline]
    pub fn set_term<T: Into<String>>(&mut self, term: T) {
        self.term = term.into();
    }

    /// Sets or clears the filter on `field` in place. A blank value clears
    /// it.
    #[inline]
    pub fn set_filter(&mut self, field: F, value: Option<String>) {
        match value.filter(|text| !text.trim().is_empty()) {
            Some(text) => {
                let _old = self.filters.insert(field, text);
            }
            None => {
                let _old = self.filters.remove(&field);
            }
        }
    }

    /// Returns the search term as entered.
    #[inline]
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.term
    }

    /// Returns the active filter value for `field`, if any.
    #[inline]
    #[must_use]
    pub fn filter_value(&self, field: F) -> Option<&str> {
        self.filters.get(&field).map(String::as_str)
    }

    /// Returns `true` if no predicate is active.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.term.trim().is_empty() && self.filters.is_empty()
    }

    /// Returns the lowercased, trimmed term, or `None` when blank.
    fn needle(&self) -> Option<String> {
        let trimmed = self.term.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    /// Returns `true` if `item` satisfies every active predicate.
    #[inline]
    pub fn matches<T: Filterable<Field = F>>(&self, item: &T) -> bool {
        self.matches_with(self.needle().as_deref(), item)
    }

    /// Evaluates the predicates with a pre-normalized needle.
    fn matches_with<T: Filterable<Field = F>>(&self, needle: Option<&str>, item: &T) -> bool {
        let term_ok = needle.is_none_or(|wanted| {
            item.search_fields()
                .any(|text| text.to_lowercase().contains(wanted))
        });
        term_ok
            && self
                .filters
                .iter()
                .all(|(&field, value)| item.field_value(field) == value.as_str())
    }
}

/// Returns references to the records of `items` matching `query`, in
/// input order.
#[inline]
pub fn select<'items, T: Filterable>(items: &'items [T], query: &Query<T::Field>) -> Vec<&'items T> {
    let needle = query.needle();
    items
        .iter()
        .filter(|item| query.matches_with(needle.as_deref(), *item))
        .collect()
}

/// Returns the indices of the records of `items` matching `query`,
/// ascending.
#[inline]
pub fn positions<T: Filterable>(items: &[T], query: &Query<T::Field>) -> Vec<usize> {
    let needle = query.needle();
    items
        .iter()
        .enumerate()
        .filter(|&(_, item)| query.matches_with(needle.as_deref(), item))
        .map(|(index, _)| index)
        .collect()
}

/// Returns the records of `items` matching `query`, in input order.
#[inline]
pub fn filter<T: Filterable + Clone>(items: &[T], query: &Query<T::Field>) -> Vec<T> {
    select(items, query).into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Amount, BizType, MerchantCode, MerchantStatus, PayType, PaymentCode, PaymentStatus,
    };

    fn payment(code: &str, merchant: &str, status: PaymentStatus, pay_type: PayType) -> Payment {
        Payment {
            payment_code: PaymentCode::new(code),
            merchant_code: MerchantCode::new(merchant),
            amount: Amount::new("100"),
            currency: "KRW".to_owned(),
            pay_type,
            status,
            payment_at: "2024-01-01T00:00:00Z".to_owned(),
        }
    }

    fn merchant(code: &str, name: &str, status: MerchantStatus, biz_type: BizType) -> Merchant {
        Merchant {
            merchant_code: MerchantCode::new(code),
            merchant_name: name.to_owned(),
            status,
            biz_type,
            biz_no: None,
            address: None,
            phone: None,
            email: None,
            registered_at: None,
            updated_at: None,
        }
    }

    fn sample_payments() -> Vec<Payment> {
        vec![
            payment("PAY-001", "MCHT-CAFE", PaymentStatus::Success, PayType::Online),
            payment("PAY-002", "MCHT-SHOP", PaymentStatus::Failed, PayType::Device),
            payment("PAY-003", "MCHT-CAFE", PaymentStatus::Success, PayType::Device),
            payment("PAY-004", "MCHT-MART", PaymentStatus::Pending, PayType::Mobile),
        ]
    }

    fn codes(items: &[Payment]) -> Vec<&str> {
        items.iter().map(|p| p.payment_code.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let items = sample_payments();
        let query = Query::new();
        assert!(query.is_empty());
        assert_eq!(filter(&items, &query), items);
    }

    #[test]
    fn blank_term_is_inactive() {
        let items = sample_payments();
        let query = Query::new().term("   ");
        assert!(query.is_empty());
        assert_eq!(filter(&items, &query).len(), items.len());
    }

    #[test]
    fn term_matches_any_search_field_case_insensitively() {
        let items = sample_payments();
        let by_merchant = filter(&items, &Query::new().term("cafe"));
        assert_eq!(codes(&by_merchant), ["PAY-001", "PAY-003"]);
        let by_code = filter(&items, &Query::new().term("pay-004"));
        assert_eq!(codes(&by_code), ["PAY-004"]);
    }

    #[test]
    fn field_filters_are_exact() {
        let items = sample_payments();
        let query = Query::new().filter(PaymentField::Status, "SUCCESS");
        assert_eq!(codes(&filter(&items, &query)), ["PAY-001", "PAY-003"]);
        let lowercase = Query::new().filter(PaymentField::Status, "success");
        assert!(filter(&items, &lowercase).is_empty());
    }

    #[test]
    fn predicates_are_combined_with_and() {
        let items = sample_payments();
        let query = Query::new()
            .term("cafe")
            .filter(PaymentField::Status, "SUCCESS")
            .filter(PaymentField::PayType, "DEVICE");
        assert_eq!(codes(&filter(&items, &query)), ["PAY-003"]);
    }

    #[test]
    fn empty_filter_value_clears_filter() {
        let query = Query::new()
            .filter(PaymentField::Status, "FAILED")
            .filter(PaymentField::Status, "");
        assert_eq!(query.filter_value(PaymentField::Status), None);
        assert!(query.is_empty());
        let cleared = Query::new()
            .filter(PaymentField::Currency, "KRW")
            .clear_filter(PaymentField::Currency);
        assert!(cleared.is_empty());
    }

    #[test]
    fn whitespace_filter_value_is_inactive() {
        let items = sample_payments();
        let query = Query::new().filter(PaymentField::MerchantCode, "  ");
        assert_eq!(query.filter_value(PaymentField::MerchantCode), None);
        assert!(query.is_empty());
        assert_eq!(filter(&items, &query), items);

        let mut replaced = Query::new().filter(PaymentField::Status, "FAILED");
        replaced.set_filter(PaymentField::Status, Some("\t".to_owned()));
        assert_eq!(replaced.filter_value(PaymentField::Status), None);
    }

    #[test]
    fn replacing_filter_value_keeps_latest() {
        let items = sample_payments();
        let mut query = Query::new().filter(PaymentField::Status, "FAILED");
        query.set_filter(PaymentField::Status, Some("PENDING".to_owned()));
        assert_eq!(codes(&filter(&items, &query)), ["PAY-004"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let items = sample_payments();
        let query = Query::new().term("mcht").filter(PaymentField::PayType, "DEVICE");
        let once = filter(&items, &query);
        let twice = filter(&once, &query);
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_codes_can_be_filtered() {
        let mut items = sample_payments();
        items.push(payment(
            "PAY-005",
            "MCHT-NEW",
            PaymentStatus::from_code("HOLD"),
            PayType::Online,
        ));
        let query = Query::new().filter(PaymentField::Status, "HOLD");
        assert_eq!(codes(&filter(&items, &query)), ["PAY-005"]);
    }

    #[test]
    fn merchants_search_name_and_code() {
        let items = vec![
            merchant("M-1", "Blue Bottle", MerchantStatus::Active, BizType::Cafe),
            merchant("M-2", "Corner Mart", MerchantStatus::Closed, BizType::Mart),
            merchant("BLUE-3", "Sky Travel", MerchantStatus::Active, BizType::Travel),
        ];
        let by_term = select(&items, &Query::new().term("BLUE"));
        assert_eq!(by_term.len(), 2);
        let active_travel = select(
            &items,
            &Query::new()
                .filter(MerchantField::Status, "ACTIVE")
                .filter(MerchantField::BizType, "TRAVEL"),
        );
        assert_eq!(active_travel.len(), 1);
        assert_eq!(active_travel[0].merchant_name, "Sky Travel");
    }

    #[test]
    fn positions_index_matching_records() {
        let items = sample_payments();
        let query = Query::new().term("cafe");
        assert_eq!(positions(&items, &query), [0, 2]);
        assert_eq!(positions(&items, &Query::new()), [0, 1, 2, 3]);
        assert!(positions(&items, &Query::new().term("nothing")).is_empty());
    }

    #[test]
    fn matches_single_record() {
        let item = payment("PAY-9", "MCHT-X", PaymentStatus::Cancelled, PayType::Billing);
        assert!(Query::new().term("x").matches(&item));
        assert!(!Query::new().filter(PaymentField::MerchantCode, "MCHT-Y").matches(&item));
    }
}
