//! Enumeration types for constrained API values.
//!
//! The API documents a closed set of codes for each of these, but the
//! dashboard must keep rendering when the server starts sending a new one.
//! Every enum therefore carries an `Unknown` variant holding the raw code,
//! and (de)serializes through plain strings so that no value is ever
//! rejected.

use serde::{Deserialize, Serialize};

/// Defines an open string enumeration with a raw-code fallback variant.
macro_rules! define_open_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $code:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A code outside the documented set, kept verbatim.
            Unknown(String),
        }

        impl $name {
            /// All documented variants, in declaration order.
            pub const KNOWN: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the wire code of this value.
            #[inline]
            #[must_use]
            pub fn code(&self) -> &str {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unknown(raw) => raw.as_str(),
                }
            }

            /// Parses a wire code. Never fails: unrecognized codes map to
            /// [`Self::Unknown`].
            #[inline]
            #[must_use]
            pub fn from_code(code: &str) -> Self {
                Self::known_from_code(code).unwrap_or_else(|| Self::Unknown(code.to_owned()))
            }

            /// Looks up a documented variant by its wire code.
            fn known_from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Returns `true` unless this is an [`Self::Unknown`] value.
            #[inline]
            #[must_use]
            pub const fn is_known(&self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self::known_from_code(&value).unwrap_or_else(|| Self::Unknown(value))
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self::from_code(value)
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => $code.to_owned(),)+
                    $name::Unknown(raw) => raw,
                }
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

define_open_enum! {
    /// Lifecycle state of a payment.
    PaymentStatus {
        /// Awaiting completion.
        Pending => "PENDING",
        /// Settled successfully.
        Success => "SUCCESS",
        /// Rejected or errored.
        Failed => "FAILED",
        /// Cancelled or refunded.
        Cancelled => "CANCELLED",
    }
}

define_open_enum! {
    /// Channel a payment was made through.
    PayType {
        /// Online checkout.
        Online => "ONLINE",
        /// Card terminal.
        Device => "DEVICE",
        /// Mobile payment.
        Mobile => "MOBILE",
        /// Virtual bank account transfer.
        VirtualAccount => "VACT",
        /// Recurring billing.
        Billing => "BILLING",
    }
}

define_open_enum! {
    /// Lifecycle state of a merchant.
    MerchantStatus {
        /// Registered, not yet trading.
        Ready => "READY",
        /// Trading.
        Active => "ACTIVE",
        /// Temporarily suspended.
        Inactive => "INACTIVE",
        /// Permanently closed.
        Closed => "CLOSED",
    }
}

define_open_enum! {
    /// Business category of a merchant.
    BizType {
        /// Cafe, food and beverage.
        Cafe => "CAFE",
        /// Online shop.
        Shop => "SHOP",
        /// Mart or retail distribution.
        Mart => "MART",
        /// IT platform or app.
        App => "APP",
        /// Travel and lodging.
        Travel => "TRAVEL",
        /// Education.
        Edu => "EDU",
        /// Test merchant.
        Test => "TEST",
    }
}
