//! # PrizePicks Projections Integration Module
//!
//! ## Contained Modules:
//!
//! - **`strategy`**: the credential set, the endpoint set and the pure
//!   priority-based selector that turns them into a `StrategyChoice`.
//! - **`apicall`**: the `Fetcher`, one outbound request per call through the
//!   selected network path, with browser-mimicking headers.
//! - **`projections`**: the `ProjectionRecord` model and the normalizer that
//!   flattens the upstream's `data`/`included` document.
//! - **`service`**: the pipeline tying cache, retry controller, fetcher and
//!   normalizer together.

/// Network paths to the projections endpoint.
pub mod apicall;
/// Flat projection records and the normalizer producing them.
pub mod projections;
/// Cache-first, retrying fetch pipeline.
pub mod service;
/// Credential-driven strategy selection.
pub mod strategy;

pub use apicall::{browser_headers, Fetcher};
pub use projections::{normalize_projections, ProjectionRecord};
pub use service::ProjectionService;
pub use strategy::{select_strategy, Credentials, Endpoints, StrategyChoice};
