//! Uniform response envelope wrapping every API payload.

use serde::{Deserialize, Serialize};

/// `{ status, message, data }` wrapper returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Application-level status code reported by the server.
    #[serde(default)]
    pub status: i64,
    /// Human-readable status message.
    #[serde(default)]
    pub message: String,
    /// Payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Discards the envelope and returns the payload.
    #[inline]
    pub fn into_data(self) -> T {
        self.data
    }
}
