//! Newtype wrappers for entity codes.
//!
//! Payments reference merchants by code, so keeping the two code types
//! distinct stops a payment code from being passed where a merchant code
//! is expected.

use serde::{Deserialize, Serialize};

/// Macro to define a newtype code wrapping a `String`.
macro_rules! define_code {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new code from the given string.
            #[inline]
            #[must_use]
            pub fn new<T: Into<String>>(value: T) -> Self {
                Self(value.into())
            }

            /// Returns the code as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner string.
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_code! {
    /// Unique identifier of a payment (`paymentCode`).
    PaymentCode
}

define_code! {
    /// Unique identifier of a merchant (`mchtCode`).
    MerchantCode
}
