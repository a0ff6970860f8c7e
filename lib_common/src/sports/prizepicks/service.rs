//! # Projection Service
//!
//! The cache-first fetch pipeline behind `GET /nfl`:
//!
//! 1. Serve the cached record list if it has not expired.
//! 2. Otherwise invoke the payload source under the retry policy.
//! 3. Normalize the payload, store it, and return it.
//!
//! There is no single-flight guard: concurrent misses each run the whole
//! pipeline and the last one to finish owns the cache slot. Failures are
//! never cached.
//!
//! Steps 2 and 3 run on their own task. A caller that goes away (a client
//! disconnect drops the handler future) detaches from the task instead of
//! cancelling it, so the fetch runs to completion or timeout and still
//! fills the cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::projections::{normalize_projections, ProjectionRecord};
use crate::cache::ResultCache;
use crate::retrieve::{retry_with_backoff, FetchError, PayloadSource, RetryPolicy};

/// Owns the payload source, the retry policy and the result cache.
pub struct ProjectionService<S> {
    source: Arc<S>,
    policy: RetryPolicy,
    cache: Arc<ResultCache<Vec<ProjectionRecord>>>,
}

impl<S: PayloadSource> ProjectionService<S> {
    /// Wires a source to a fresh, empty cache.
    pub fn new(source: S, policy: RetryPolicy, cache_ttl: Duration) -> Self {
        Self {
            source: Arc::new(source),
            policy,
            cache: Arc::new(ResultCache::new(cache_ttl)),
        }
    }

    /// The payload source in use.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The retry policy in use.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Time-to-live of cached record lists.
    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }
}

impl<S: PayloadSource + 'static> ProjectionService<S> {
    /// Returns the current projection records, fetching them on a cache miss.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// The final `FetchError` of the retry sequence, or `FetchError::Task`
    /// if the fetch task panicked.
    pub async fn get_projections(&self) -> Result<Arc<Vec<ProjectionRecord>>, FetchError> {
        if let Some(records) = self.cache.get().await {
            debug!(records = records.len(), "serving projections from cache");
            return Ok(records);
        }

        let task = tokio::spawn(refresh(
            Arc::clone(&self.source),
            self.policy.clone(),
            Arc::clone(&self.cache),
        ));

        task.await
            .map_err(|e| FetchError::Task(e.to_string()))?
    }
}

/// Fetch, normalize and store one record list.
async fn refresh<S: PayloadSource>(
    source: Arc<S>,
    policy: RetryPolicy,
    cache: Arc<ResultCache<Vec<ProjectionRecord>>>,
) -> Result<Arc<Vec<ProjectionRecord>>, FetchError> {
    let started = Instant::now();
    let strategy = source.label();

    let payload = match retry_with_backoff(&policy, || source.fetch()).await {
        Ok(payload) => payload,
        Err(err) => {
            debug!(
                strategy,
                status = err.status(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "projections fetch gave up: {}",
                err
            );
            return Err(err);
        }
    };

    let records = normalize_projections(&payload);
    info!(
        strategy,
        records = records.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "projections refreshed"
    );

    Ok(cache.set(records).await)
}
