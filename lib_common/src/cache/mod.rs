//! # Cache Module
//!
//! In-process caching primitives. The only resident is `result_cache`, a
//! single-slot store with passive TTL expiry that sits in front of the
//! upstream fetch pipeline so that repeated client requests inside the TTL
//! window are served from memory.

/// Single-slot, TTL-bounded cache of the last successful result.
pub mod result_cache;

pub use result_cache::ResultCache;
