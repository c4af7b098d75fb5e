//! Error types for the payment-operations client library.

/// All errors that can occur when using the payops client.
#[derive(Debug, thiserror::Error)]
pub enum PayOpsError {
    /// HTTP transport failed (connection, TLS, body read).
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status code.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or a fallback description.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configured base URL is not a valid absolute URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// No base URL was configured.
    #[error("API base URL is not configured")]
    MissingBaseUrl,

    /// A configuration value could not be interpreted.
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting {
        /// Setting (environment variable) name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, PayOpsError>;
