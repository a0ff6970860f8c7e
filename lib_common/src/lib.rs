//! # lib_common
//!
//! Shared building blocks for the NFL projections proxy. Every module sits
//! behind a Cargo feature of the same name so that binaries only pull in the
//! dependencies they use.
//!
//! - **`retrieve`**: the browser-mimicking HTTP client, the fetch error
//!   taxonomy and the retry/backoff controller.
//! - **`cache`**: the single-slot, TTL-bounded result cache.
//! - **`sports`**: the PrizePicks projections provider (strategy selection,
//!   fetch strategies, normalizer and the cached fetch pipeline).

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

#[cfg(feature = "cache")]
pub mod cache;
#[cfg(feature = "retrieve")]
pub mod retrieve;
#[cfg(feature = "sports")]
pub mod sports;
