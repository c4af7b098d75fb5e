//! Rust client and list pipeline for a payment-operations dashboard API.
//!
//! The crate fetches payments and merchants from a read-only REST API and
//! provides the pure transformations a dashboard needs on top of them:
//! search and filtering ([`query`]), pagination ([`paginate`]), summary
//! statistics and chart buckets ([`stats`]), and per-view state tying them
//! together ([`view`]).

extern crate alloc;

#[cfg(any(feature = "async", feature = "blocking"))]
pub mod client;
pub mod config;
pub mod error;
pub mod labels;
pub mod models;
pub mod paginate;
pub mod query;
pub mod stats;
pub mod view;
