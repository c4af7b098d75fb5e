//! Payment model.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Amount, MerchantCode, PayType, PaymentCode, PaymentStatus};

/// A single payment transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique payment identifier.
    pub payment_code: PaymentCode,
    /// Merchant that originated the payment.
    #[serde(rename = "mchtCode")]
    pub merchant_code: MerchantCode,
    /// Amount as a decimal string.
    pub amount: Amount,
    /// Currency code (e.g. `KRW`).
    pub currency: String,
    /// Payment channel.
    pub pay_type: PayType,
    /// Lifecycle state.
    pub status: PaymentStatus,
    /// ISO 8601 timestamp of the payment.
    pub payment_at: String,
}

impl Payment {
    /// Returns `true` if the payment settled successfully.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Success
    }

    /// Returns the calendar-date part of [`Self::payment_at`], i.e. the text
    /// before the time separator (`T` or a space).
    #[inline]
    #[must_use]
    pub fn date(&self) -> &str {
        self.payment_at
            .split_once(['T', ' '])
            .map_or(self.payment_at.as_str(), |(date, _)| date)
    }

    /// Parses [`Self::payment_at`].
    ///
    /// Accepts RFC 3339 timestamps and offset-less ISO timestamps (read as
    /// UTC). Returns `None` for anything else.
    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.payment_at)
    }
}

/// Parses an ISO 8601 timestamp with or without a UTC offset.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
