//! Runtime configuration loaded from the environment.

use core::num::NonZeroUsize;

use url::Url;

use crate::error::{PayOpsError, Result};

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "PAYOPS_API_URL";

/// Environment variable overriding the list page size.
pub const PAGE_SIZE_ENV: &str = "PAYOPS_PAGE_SIZE";

/// Environment variable overriding how many recent payments the dashboard shows.
pub const RECENT_COUNT_ENV: &str = "PAYOPS_RECENT_COUNT";

/// Default number of rows per list page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

/// Default number of payments in the dashboard's recent list.
pub const DEFAULT_RECENT_COUNT: usize = 5;

/// Settings shared by the client and the list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API base URL.
    pub base_url: Url,
    /// Rows per list page.
    pub page_size: NonZeroUsize,
    /// Payments shown in the dashboard's recent list.
    pub recent_count: usize,
}

impl Config {
    /// Creates a configuration with default view settings.
    #[inline]
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            page_size: DEFAULT_PAGE_SIZE,
            recent_count: DEFAULT_RECENT_COUNT,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`PayOpsError::MissingBaseUrl`] if [`BASE_URL_ENV`] is unset
    /// or empty, [`PayOpsError::InvalidBaseUrl`] if it does not parse, and
    /// [`PayOpsError::InvalidSetting`] for malformed numeric overrides.
    #[inline]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    #[inline]
    #[tracing::instrument(skip_all)]
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(BASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or(PayOpsError::MissingBaseUrl)?;
        let mut config = Self::new(Url::parse(raw_url.trim())?);

        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            let size = parse_count(PAGE_SIZE_ENV, &raw)?;
            config.page_size = NonZeroUsize::new(size).ok_or_else(|| PayOpsError::InvalidSetting {
                name: PAGE_SIZE_ENV,
                reason: "must be greater than zero".to_owned(),
            })?;
        }
        if let Some(raw) = lookup(RECENT_COUNT_ENV) {
            config.recent_count = parse_count(RECENT_COUNT_ENV, &raw)?;
        }

        tracing::debug!(
            base_url = %config.base_url,
            page_size = config.page_size.get(),
            recent_count = config.recent_count,
            "configuration loaded"
        );
        Ok(config)
    }
}

/// Parses a non-negative integer setting.
fn parse_count(name: &'static str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|err| PayOpsError::InvalidSetting {
            name,
            reason: err.to_string(),
        })
}
