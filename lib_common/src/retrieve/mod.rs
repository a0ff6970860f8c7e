//! # Data Retrieval Module
//!
//! This module provides a centralized location for generic data retrieval
//! clients and utilities, primarily focused on HTTP-based interactions.
//!
//! ## Purpose:
//! The goal of the `retrieve` module is to offer a consistent and robust way
//! to fetch data from external services, encapsulating common concerns such
//! as HTTP request building, error classification, and retry mechanisms.
//!
//! ## Contained Modules:
//!
//! - **`ky_http`**: A generic HTTP `ApiClient` built on `reqwest` with a
//!   per-client timeout, an optional forward proxy and a fixed header set.
//! - **`error`**: The `FetchError` taxonomy shared by every fetch path,
//!   including the retryable/non-retryable classification.
//! - **`backoff`**: The retry controller with exponential backoff and jitter.
//! - **`source`**: The `PayloadSource` trait, the seam between a concrete
//!   network path and the pipeline that consumes its payloads.

/// Retry controller with capped exponential backoff and jitter.
pub mod backoff;
/// Error taxonomy for all outbound fetches.
pub mod error;
/// Generic HTTP API client used by every fetch strategy.
pub mod ky_http;
/// Trait implemented by anything that can produce a raw JSON payload.
pub mod source;

pub use backoff::{retry_with_backoff, RetryPolicy};
pub use error::FetchError;
pub use ky_http::{ApiClient, ApiResponse};
pub use source::PayloadSource;
