//! Data models for the payment-operations API.
//!
//! This module contains strongly-typed representations of payments and
//! merchants, the response envelope, newtype code wrappers, and open
//! enumeration types for constrained values.

mod amount;
mod enums;
mod envelope;
mod ids;
mod merchant;
mod payment;

pub use amount::Amount;
pub use enums::{BizType, MerchantStatus, PayType, PaymentStatus};
pub use envelope::ApiResponse;
pub use ids::{MerchantCode, PaymentCode};
pub use merchant::Merchant;
pub(crate) use payment::parse_timestamp;
pub use payment::Payment;
