//! Data provider abstraction.
//!
//! Report generation never talks to a data store directly. A [`DataProvider`]
//! is constructed once at startup and passed to the generator and the batch
//! orchestrator, so tests can swap in an [`InMemoryProvider`].
//!
//! # Example
//!
//! ```ignore
//! use reportcard_engine::provider::{DataProvider, InMemoryProvider};
//!
//! let provider = InMemoryProvider::from_fixture_file("fixtures/class.json")?;
//! let student = provider.fetch_student(&"S1".into()).await?;
//! let grades = provider.fetch_grades(&"S1".into(), "ONE").await?;
//! ```

mod memory;

pub use memory::InMemoryProvider;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reportcard_core::ReportError;
use reportcard_models::{GradeRecord, StudentId, StudentRecord};

/// Boxed future returned by [`DataProvider`] methods.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ReportError>> + Send + 'a>>;

/// Source of student and grade records.
///
/// Implementations map their raw documents into the typed records at this
/// boundary. "No data" is never an error: an unknown student is `Ok(None)` and
/// a term without grades is an empty vector. Only transport-level failures are
/// reported, as [`ReportError::DataFetch`].
pub trait DataProvider: Send + Sync {
    /// Short name of the backing store, shown by diagnostics.
    fn name(&self) -> &str;

    fn fetch_student<'a>(&'a self, id: &'a StudentId) -> ProviderFuture<'a, Option<StudentRecord>>;

    /// Grade records of `id` for `term`. Duplicates are returned as stored.
    fn fetch_grades<'a>(
        &'a self,
        id: &'a StudentId,
        term: &'a str,
    ) -> ProviderFuture<'a, Vec<GradeRecord>>;

    /// Round trip to the store to check connectivity.
    fn ping<'a>(&'a self) -> ProviderFuture<'a, ()> {
        Box::pin(async { Ok(()) })
    }
}

/// Runs one provider call under `timeout`; expiry becomes a `DataFetch` error.
pub async fn fetch_with_timeout<T, F>(timeout: Duration, fut: F) -> Result<T, ReportError>
where
    F: Future<Output = Result<T, ReportError>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| ReportError::data_fetch(format!("request timed out after {timeout:?}")))?
}
