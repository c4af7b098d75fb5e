//! Dashboard aggregates over the full payment collection.
//!
//! Amounts are summed as `f64`; see [`Amount`](crate::models::Amount).

use alloc::collections::BTreeMap;
use core::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Payment, PaymentStatus};

/// Headline statistics for the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of successful payment amounts.
    pub total_amount: f64,
    /// Number of payments, any status.
    pub total_count: usize,
    /// Number of successful payments.
    pub success_count: usize,
    /// Share of failed payments in percent, rounded to one decimal place.
    pub fail_rate_percent: f64,
}

/// Successful payment volume for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    /// Date in `YYYY-MM-DD` form.
    pub date: String,
    /// Sum of successful amounts on that date.
    pub amount: f64,
}

/// Computes the dashboard headline statistics.
///
/// An empty collection yields all zeros.
#[inline]
#[must_use]
pub fn summarize(payments: &[Payment]) -> Summary {
    let mut summary = Summary {
        total_count: payments.len(),
        ..Summary::default()
    };
    let mut failed = 0_usize;
    for payment in payments {
        match payment.status {
            PaymentStatus::Success => {
                summary.success_count = summary.success_count.saturating_add(1);
                summary.total_amount += payment.amount.value();
            }
            PaymentStatus::Failed => failed = failed.saturating_add(1),
            PaymentStatus::Pending | PaymentStatus::Cancelled | PaymentStatus::Unknown(_) => {}
        }
    }
    summary.fail_rate_percent = round_one_decimal(percent(failed, payments.len()));
    summary
}

/// Sums successful payment amounts per calendar date, ascending by date.
///
/// Dates without successful payments are omitted.
#[inline]
#[must_use]
pub fn bucket_by_date(payments: &[Payment]) -> Vec<DailyTotal> {
    let mut buckets: BTreeMap<&str, f64> = BTreeMap::new();
    for payment in payments.iter().filter(|payment| payment.is_success()) {
        *buckets.entry(payment.date()).or_insert(0.0) += payment.amount.value();
    }
    buckets
        .into_iter()
        .map(|(date, amount)| DailyTotal {
            date: date.to_owned(),
            amount,
        })
        .collect()
}

/// Returns up to `n` payments, most recent first.
///
/// Payments at the same instant keep their input order, however the
/// timestamp is written. Timestamps that do not parse sort after every
/// parseable one.
#[inline]
#[must_use]
pub fn most_recent(payments: &[Payment], n: usize) -> Vec<&Payment> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, &Payment)> = payments
        .iter()
        .map(|payment| (payment.timestamp(), payment))
        .collect();
    keyed.sort_by(|&left, &right| newer_first(left, right));
    keyed.into_iter().take(n).map(|(_, payment)| payment).collect()
}

/// Newest instant first. Equal instants compare equal so the stable sort
/// keeps input order; unparseable timestamps go last, ordered by raw text.
fn newer_first(
    (left_at, left): (Option<DateTime<Utc>>, &Payment),
    (right_at, right): (Option<DateTime<Utc>>, &Payment),
) -> Ordering {
    match (left_at, right_at) {
        (Some(left_instant), Some(right_instant)) => right_instant.cmp(&left_instant),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => right.payment_at.cmp(&left.payment_at),
    }
}

/// `part / whole * 100`, or `0` when `whole` is zero.
#[expect(
    clippy::cast_precision_loss,
    reason = "record counts stay far below 2^52"
)]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Rounds half away from zero to one decimal place.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, MerchantCode, PayType, PaymentCode};

    fn payment(code: &str, amount: &str, status: PaymentStatus, at: &str) -> Payment {
        Payment {
            payment_code: PaymentCode::new(code),
            merchant_code: MerchantCode::new("MCHT-1"),
            amount: Amount::new(amount),
            currency: "KRW".to_owned(),
            pay_type: PayType::Online,
            status,
            payment_at: at.to_owned(),
        }
    }

    fn approx(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
        assert!(approx(summary.fail_rate_percent, 0.0));
    }

    #[test]
    fn summarize_success_and_failure() {
        let payments = [
            payment("P1", "1000", PaymentStatus::Success, "2024-01-01T00:00:00Z"),
            payment("P2", "500", PaymentStatus::Failed, "2024-01-01T01:00:00Z"),
        ];
        let summary = summarize(&payments);
        assert!(approx(summary.total_amount, 1000.0));
        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.success_count, 1);
        assert!(approx(summary.fail_rate_percent, 50.0));
    }

    #[test]
    fn fail_rate_rounds_to_one_decimal() {
        let payments = [
            payment("P1", "1", PaymentStatus::Failed, "2024-01-01T00:00:00Z"),
            payment("P2", "1", PaymentStatus::Success, "2024-01-01T00:00:00Z"),
            payment("P3", "1", PaymentStatus::Pending, "2024-01-01T00:00:00Z"),
        ];
        assert!(approx(summarize(&payments).fail_rate_percent, 33.3));
    }

    #[test]
    fn non_success_amounts_are_excluded() {
        let payments = [
            payment("P1", "700", PaymentStatus::Cancelled, "2024-01-01T00:00:00Z"),
            payment("P2", "300", PaymentStatus::from_code("HOLD"), "2024-01-01T00:00:00Z"),
            payment("P3", "250.5", PaymentStatus::Success, "2024-01-01T00:00:00Z"),
        ];
        let summary = summarize(&payments);
        assert!(approx(summary.total_amount, 250.5));
        assert_eq!(summary.success_count, 1);
        assert!(approx(summary.fail_rate_percent, 0.0));
    }

    #[test]
    fn buckets_successful_amounts_by_date() {
        let payments = [
            payment("P1", "100", PaymentStatus::Success, "2024-01-02T10:00:00Z"),
            payment("P2", "50", PaymentStatus::Success, "2024-01-02T15:00:00Z"),
            payment("P3", "999", PaymentStatus::Failed, "2024-01-01T00:00:00Z"),
        ];
        let buckets = bucket_by_date(&payments);
        assert_eq!(
            buckets,
            vec![DailyTotal {
                date: "2024-01-02".to_owned(),
                amount: 150.0,
            }]
        );
    }

    #[test]
    fn buckets_are_sorted_ascending_without_gaps() {
        let payments = [
            payment("P1", "10", PaymentStatus::Success, "2024-03-05T00:00:00Z"),
            payment("P2", "20", PaymentStatus::Success, "2024-03-01T00:00:00Z"),
            payment("P3", "30", PaymentStatus::Success, "2024-03-05T23:59:59Z"),
        ];
        let dates: Vec<String> = bucket_by_date(&payments)
            .into_iter()
            .map(|bucket| bucket.date)
            .collect();
        assert_eq!(dates, ["2024-03-01", "2024-03-05"]);
    }

    #[test]
    fn buckets_of_empty_input_are_empty() {
        assert!(bucket_by_date(&[]).is_empty());
    }

    #[test]
    fn most_recent_orders_descending() {
        let payments = [
            payment("P1", "1", PaymentStatus::Success, "2024-01-01T00:00:00Z"),
            payment("P2", "1", PaymentStatus::Success, "2024-01-03T00:00:00Z"),
            payment("P3", "1", PaymentStatus::Success, "2024-01-02T00:00:00Z"),
        ];
        let recent = most_recent(&payments, 5);
        let codes: Vec<&str> = recent.iter().map(|p| p.payment_code.as_str()).collect();
        assert_eq!(codes, ["P2", "P3", "P1"]);
        assert_eq!(payments[0].payment_code.as_str(), "P1");
    }

    #[test]
    fn most_recent_truncates_and_keeps_ties_stable() {
        let payments = [
            payment("A", "1", PaymentStatus::Success, "2024-01-01T00:00:00Z"),
            payment("B", "1", PaymentStatus::Success, "2024-01-05T00:00:00Z"),
            payment("C", "1", PaymentStatus::Success, "2024-01-05T00:00:00Z"),
            payment("D", "1", PaymentStatus::Success, "2024-01-04T00:00:00Z"),
        ];
        let recent = most_recent(&payments, 2);
        let codes: Vec<&str> = recent.iter().map(|p| p.payment_code.as_str()).collect();
        assert_eq!(codes, ["B", "C"]);
    }

    #[test]
    fn same_instant_keeps_input_order_across_notations() {
        let payments = [
            payment("FIRST", "1", PaymentStatus::Success, "2024-01-01T00:00:00Z"),
            payment("SECOND", "1", PaymentStatus::Success, "2024-01-01T09:00:00+09:00"),
            payment("THIRD", "1", PaymentStatus::Success, "2024-01-01T00:00:00.000"),
        ];
        let recent = most_recent(&payments, 3);
        let codes: Vec<&str> = recent.iter().map(|p| p.payment_code.as_str()).collect();
        assert_eq!(codes, ["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn unparseable_timestamps_sort_last() {
        let payments = [
            payment("BAD-A", "1", PaymentStatus::Success, "yesterday"),
            payment("OLD", "1", PaymentStatus::Success, "2020-01-01T00:00:00Z"),
            payment("BAD-B", "1", PaymentStatus::Success, "unknown"),
        ];
        let recent = most_recent(&payments, 3);
        let codes: Vec<&str> = recent.iter().map(|p| p.payment_code.as_str()).collect();
        assert_eq!(codes, ["OLD", "BAD-A", "BAD-B"]);
    }

    #[test]
    fn most_recent_compares_instants_across_offsets() {
        let payments = [
            payment("KST", "1", PaymentStatus::Success, "2024-01-01T08:00:00+09:00"),
            payment("UTC", "1", PaymentStatus::Success, "2024-01-01T00:30:00Z"),
        ];
        let recent = most_recent(&payments, 1);
        assert_eq!(recent[0].payment_code.as_str(), "UTC");
    }

    #[test]
    fn most_recent_of_empty_is_empty() {
        assert!(most_recent(&[], 3).is_empty());
        let one = [payment("P", "1", PaymentStatus::Pending, "2024-01-01T00:00:00Z")];
        assert!(most_recent(&one, 0).is_empty());
    }
}
