//! HTTP client for the payment-operations API.
//!
//! Provides both async and blocking client variants behind feature flags.
//! All endpoints are read-only GETs returning the [`ApiResponse`]
//! envelope; no authentication header is sent.
//!
//! [`ApiResponse`]: crate::models::ApiResponse

/// Path segments of the payment list endpoint.
const PAYMENTS_PATH: &[&str] = &["payments", "list"];

/// Path segments of the merchant list endpoint.
const MERCHANTS_PATH: &[&str] = &["merchants", "list"];

/// Path segments preceding the merchant code in the detail endpoint.
const MERCHANT_DETAIL_PATH: &[&str] = &["merchants", "details"];

/// Resolves `segments` (plus an optional trailing segment) against `base`.
///
/// Segments are percent-encoded, so a merchant code containing `/` or
/// spaces still addresses a single path segment.
fn endpoint(base: &url::Url, segments: &[&str], last: Option<&str>) -> crate::error::Result<url::Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| crate::error::PayOpsError::InvalidSetting {
                name: "base_url",
                reason: "URL cannot be used as a base".to_owned(),
            })?;
        _ = path.pop_if_empty().extend(segments.iter().copied().chain(last));
    }
    Ok(url)
}

/// Parses and validates a base URL.
fn parse_base_url(raw: &str) -> crate::error::Result<url::Url> {
    let url = url::Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(crate::error::PayOpsError::InvalidSetting {
            name: "base_url",
            reason: format!("{raw} cannot be used as a base"),
        });
    }
    Ok(url)
}

/// Generates a payops client (async or blocking) with builder, methods, and tests.
macro_rules! define_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        http_type: $http_type:ty,
        response_type: $resp_type:ty,
        client_doc: $client_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder {
            /// API base URL.
            base_url: Option<String>,
        }

        impl $builder {
            /// Sets the API base URL (e.g. `https://api.example.com/api`).
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`PayOpsError::MissingBaseUrl`] if no base URL was set.
            /// Returns [`PayOpsError::InvalidBaseUrl`] if it does not parse.
            /// Returns [`PayOpsError::Http`] if the HTTP client fails to build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let raw = self.base_url.ok_or(PayOpsError::MissingBaseUrl)?;
                let base_url = parse_base_url(&raw)?;
                tracing::debug!(base_url = %base_url, "building client");
                let http = <$http_type>::builder().build()?;

                Ok($client { http, base_url })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// API base URL.
            base_url: Url,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder { base_url: None }
            }

            /// Creates a client pointed at the configured base URL.
            ///
            /// # Errors
            ///
            /// Returns [`PayOpsError::Http`] if the HTTP client fails to build.
            #[inline]
            pub fn from_config(config: &Config) -> Result<Self> {
                Self::builder().base_url(config.base_url.as_str()).build()
            }

            /// Returns the base URL requests are resolved against.
            #[inline]
            #[must_use]
            pub const fn base_url(&self) -> &Url {
                &self.base_url
            }

            /// Fetches every payment via `GET /payments/list`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn payments(&self) -> Result<Vec<Payment>> {
                tracing::debug!("fetching payments");
                let url = endpoint(&self.base_url, PAYMENTS_PATH, None)?;
                let envelope: ApiResponse<Vec<Payment>> = self.get_json(url) $( .$await_ext )? ?;
                tracing::debug!(count = envelope.data.len(), "payments received");
                Ok(envelope.into_data())
            }

            /// Fetches every merchant via `GET /merchants/list`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn merchants(&self) -> Result<Vec<Merchant>> {
                tracing::debug!("fetching merchants");
                let url = endpoint(&self.base_url, MERCHANTS_PATH, None)?;
                let envelope: ApiResponse<Vec<Merchant>> = self.get_json(url) $( .$await_ext )? ?;
                tracing::debug!(count = envelope.data.len(), "merchants received");
                Ok(envelope.into_data())
            }

            /// Fetches one merchant via `GET /merchants/details/{code}`.
            ///
            /// Returns `Ok(None)` when the server answers 404 or the envelope
            /// carries no data.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns
            /// another non-success status, or the response cannot be
            /// deserialized.
            #[inline]
            #[tracing::instrument(skip_all, fields(code = %code))]
            pub $($async_kw)? fn merchant_detail(
                &self,
                code: &MerchantCode,
            ) -> Result<Option<Merchant>> {
                let url = endpoint(&self.base_url, MERCHANT_DETAIL_PATH, Some(code.as_str()))?;
                match self.get_json::<ApiResponse<Option<Merchant>>>(url) $( .$await_ext )? {
                    Ok(envelope) => Ok(envelope.into_data()),
                    Err(PayOpsError::Api { status: 404, .. }) => {
                        tracing::debug!("merchant not found");
                        Ok(None)
                    }
                    Err(err) => Err(err),
                }
            }

            /// Sends a JSON GET request and deserializes the response.
            #[tracing::instrument(skip_all, fields(url = %url))]
            $($async_kw)? fn get_json<Resp: serde::de::DeserializeOwned>(
                &self,
                url: Url,
            ) -> Result<Resp> {
                tracing::trace!("sending GET request");
                let response: $resp_type = self
                    .http
                    .get(url)
                    .header(ACCEPT, "application/json")
                    .send()
                    $( .$await_ext )?
                    ?;

                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    let body = response.text() $( .$await_ext )? ?;
                    tracing::trace!(body_len = body.len(), "parsing response body");
                    serde_json::from_str(&body).map_err(PayOpsError::from)
                } else {
                    let message = response
                        .text()
                        $( .$await_ext )?
                        .unwrap_or_else(|_| "unknown error".to_owned());
                    tracing::debug!(status = status.as_u16(), message = %message, "API error");
                    Err(PayOpsError::Api {
                        status: status.as_u16(),
                        message,
                    })
                }
            }
        }

    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async HTTP client for the payment-operations API.

    use reqwest::header::ACCEPT;
    use url::Url;

    use super::{MERCHANT_DETAIL_PATH, MERCHANTS_PATH, PAYMENTS_PATH, endpoint, parse_base_url};
    use crate::config::Config;
    use crate::error::{PayOpsError, Result};
    use crate::models::{ApiResponse, Merchant, MerchantCode, Payment};

    define_client! {
        client_name: PayOpsClient,
        builder_name: PayOpsClientBuilder,
        http_type: reqwest::Client,
        response_type: reqwest::Response,
        client_doc: "Async client for the payment-operations API.\n\nUse [`PayOpsClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`PayOpsClient`].",
        async_kw: async,
        await_kw: await,
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) HTTP client for the payment-operations API.

    use reqwest::header::ACCEPT;
    use url::Url;

    use super::{MERCHANT_DETAIL_PATH, MERCHANTS_PATH, PAYMENTS_PATH, endpoint, parse_base_url};
    use crate::config::Config;
    use crate::error::{PayOpsError, Result};
    use crate::models::{ApiResponse, Merchant, MerchantCode, Payment};

    define_client! {
        client_name: PayOpsBlockingClient,
        builder_name: PayOpsBlockingClientBuilder,
        http_type: reqwest::blocking::Client,
        response_type: reqwest::blocking::Response,
        client_doc: "Blocking (synchronous) client for the payment-operations API.\n\nUse [`PayOpsBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`PayOpsBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_client::{PayOpsClient, PayOpsClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{PayOpsBlockingClient, PayOpsBlockingClientBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_segments() {
        let base = parse_base_url("http://localhost:8080").unwrap();
        let url = endpoint(&base, PAYMENTS_PATH, None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/payments/list");
    }

    #[test]
    fn endpoint_keeps_base_path_with_trailing_slash() {
        let base = parse_base_url("https://api.example.com/v1/").unwrap();
        let url = endpoint(&base, MERCHANTS_PATH, None).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/merchants/list");
    }

    #[test]
    fn endpoint_encodes_merchant_code() {
        let base = parse_base_url("https://api.example.com").unwrap();
        let url = endpoint(&base, MERCHANT_DETAIL_PATH, Some("A/B C")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/merchants/details/A%2FB%20C"
        );
    }
}
