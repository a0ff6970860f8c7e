use std::future::Future;

use serde_json::Value;

use super::error::FetchError;

/// A network path that yields the upstream's raw JSON document.
///
/// Implementors perform exactly one outbound request per call; retrying is
/// the caller's concern (see [`retry_with_backoff`](super::retry_with_backoff)).
pub trait PayloadSource: Send + Sync {
    /// Short, stable label identifying the path (used in logs and status output).
    fn label(&self) -> &'static str;

    /// Performs one fetch.
    fn fetch(&self) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

impl<T: PayloadSource> PayloadSource for std::sync::Arc<T> {
    fn label(&self) -> &'static str {
        T::label(self)
    }

    fn fetch(&self) -> impl Future<Output = Result<Value, FetchError>> + Send {
        T::fetch(self)
    }
}
