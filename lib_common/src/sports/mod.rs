//! # Sports Data Providers Module
//!
//! This module groups the logic and client implementations for sports data
//! providers. Its purpose is to hide the details of reaching and parsing an
//! external provider and to hand normalized records to the rest of the
//! system.
//!
//! ## Contained Modules:
//!
//! - **`prizepicks`**: the PrizePicks projections API. The upstream blocks
//!   naive automated traffic, so this module carries the fetch strategies
//!   (bypass services, forward proxy, direct), the credential-driven
//!   strategy selector, the relational-JSON normalizer and the cached,
//!   retrying fetch pipeline.

/// Client, normalizer and pipeline for the PrizePicks projections API.
pub mod prizepicks;
