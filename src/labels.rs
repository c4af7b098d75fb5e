//! Display labels, badge tones and placeholder helpers.
//!
//! Every lookup here is total: a code missing from the label table is shown
//! as the code itself, and a missing optional attribute is shown as a
//! placeholder.

use chrono::{DateTime, Utc};

use crate::models::{BizType, MerchantStatus, PayType, PaymentStatus, parse_timestamp};

/// Placeholder shown for absent optional attributes.
pub const PLACEHOLDER: &str = "-";

/// Placeholder shown for a merchant without a registered address.
pub const ADDRESS_PLACEHOLDER: &str = "주소 미등록";

/// Visual emphasis of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Completed, healthy.
    Positive,
    /// Failed.
    Negative,
    /// Needs attention (refunds, suspensions).
    Warning,
    /// Not yet started.
    Caution,
    /// Normal operating state.
    Info,
    /// No emphasis.
    Neutral,
}

/// A value with a human-readable label and a badge tone.
pub trait Labeled {
    /// Returns the display label, or the raw code when none is known.
    fn label(&self) -> &str;

    /// Returns the badge tone.
    fn tone(&self) -> Tone;
}

impl Labeled for PaymentStatus {
    #[inline]
    fn label(&self) -> &str {
        match self {
            Self::Pending => "결제 대기",
            Self::Success => "결제 완료",
            Self::Failed => "결제 실패",
            Self::Cancelled => "환불 완료",
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    #[inline]
    fn tone(&self) -> Tone {
        match self {
            Self::Success => Tone::Positive,
            Self::Failed => Tone::Negative,
            Self::Cancelled => Tone::Warning,
            Self::Pending | Self::Unknown(_) => Tone::Neutral,
        }
    }
}

impl Labeled for PayType {
    #[inline]
    fn label(&self) -> &str {
        match self {
            Self::Online => "온라인",
            Self::Device => "단말기",
            Self::Mobile => "모바일",
            Self::VirtualAccount => "가상계좌",
            Self::Billing => "정기결제",
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    #[inline]
    fn tone(&self) -> Tone {
        Tone::Neutral
    }
}

impl Labeled for MerchantStatus {
    #[inline]
    fn label(&self) -> &str {
        match self {
            Self::Active => "영업",
            Self::Ready => "대기",
            Self::Inactive => "중단",
            Self::Closed => "폐업",
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    #[inline]
    fn tone(&self) -> Tone {
        match self {
            Self::Active => Tone::Info,
            Self::Ready => Tone::Caution,
            Self::Inactive => Tone::Warning,
            Self::Closed | Self::Unknown(_) => Tone::Neutral,
        }
    }
}

impl Labeled for BizType {
    #[inline]
    fn label(&self) -> &str {
        match self {
            Self::Cafe => "카페/식음료",
            Self::Shop => "쇼핑몰",
            Self::Mart => "마트/유통",
            Self::App => "IT/플랫폼",
            Self::Travel => "여행/숙박",
            Self::Edu => "교육/학원",
            Self::Test => "테스트",
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    #[inline]
    fn tone(&self) -> Tone {
        Tone::Neutral
    }
}

/// Returns the value, or `placeholder` when it is absent or blank.
#[inline]
#[must_use]
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    value
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(placeholder)
}

/// Formats an ISO timestamp with a `chrono` format string.
///
/// Unparseable timestamps are returned unchanged.
#[inline]
#[must_use]
pub fn format_timestamp(raw: &str, format: &str) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), |dt: DateTime<Utc>| dt.format(format).to_string())
}

/// Formats a number with comma thousands separators and at most two
/// fraction digits (`1234567.5` becomes `1,234,567.5`).
#[inline]
#[must_use]
pub fn group_thousands(value: f64) -> String {
    let text = format!("{:.2}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_trimmed = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(text.len().saturating_mul(2));
    if value < 0.0 && text != "0.00" {
        out.push('-');
    }
    let digit_count = int_part.len();
    for (pos, digit) in int_part.chars().enumerate() {
        if pos > 0 && (digit_count - pos) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !frac_trimmed.is_empty() {
        out.push('.');
        out.push_str(frac_trimmed);
    }
    out
}
