//! Batch orchestration with per-student failure isolation.
//!
//! Every requested identifier yields exactly one [`BatchOutcome`], in request
//! order. Failures of one student (unknown id, fetch error, timeout, template
//! failure) are recorded and never abort the rest of the batch.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reportcard_config::BatchConfig;
use reportcard_core::ReportError;
use reportcard_models::{
    BatchGenerateRequest, BatchOutcome, BatchResult, ReportContext, RequiredFields, StudentId,
};
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::generator::{GeneratedReport, ReportGenerator};
use crate::provider::DataProvider;

pub const DEADLINE_EXCEEDED: &str = "Batch deadline exceeded";

/// Stand-in for a deadline too far away to represent as an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

pub type SinkFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ReportError>> + Send + 'a>>;

/// Receives every document a batch generates successfully.
///
/// A sink error turns that student's outcome into a failure.
pub trait DocumentSink: Send + Sync {
    fn accept<'a>(&'a self, report: &'a GeneratedReport) -> SinkFuture<'a>;
}

#[derive(Clone)]
pub struct BatchOrchestrator {
    generator: Arc<ReportGenerator>,
    config: BatchConfig,
    sink: Option<Arc<dyn DocumentSink>>,
}

impl BatchOrchestrator {
    pub fn new(generator: Arc<ReportGenerator>, config: BatchConfig) -> Self {
        Self {
            generator,
            config,
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DocumentSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Generates a report card for every identifier in `student_ids`.
    ///
    /// Fails only when the list is empty or the context lacks a term or class,
    /// before any student is processed.
    #[instrument(skip_all, fields(students = student_ids.len(), term = %ctx.term, class = %ctx.class_name))]
    pub async fn run_batch(
        &self,
        student_ids: &[StudentId],
        ctx: &ReportContext,
        provider: &dyn DataProvider,
    ) -> Result<BatchResult, ReportError> {
        if student_ids.is_empty() || !ctx.is_complete() {
            return Err(ReportError::Validation(
                BatchGenerateRequest::missing_fields_message(),
            ));
        }

        let now = Instant::now();
        let deadline = now
            .checked_add(self.config.deadline)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let attempts: Vec<_> = student_ids
            .iter()
            .map(|id| self.run_one(id, ctx, provider, deadline))
            .collect();

        // `buffered` yields in input order whatever order attempts finish in.
        let outcomes: Vec<BatchOutcome> = stream::iter(attempts)
            .buffered(self.config.max_concurrency.max(1))
            .collect()
            .await;

        let result = BatchResult::new(outcomes);
        let summary = result.summary();
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch completed"
        );

        Ok(result)
    }

    async fn run_one(
        &self,
        id: &StudentId,
        ctx: &ReportContext,
        provider: &dyn DataProvider,
        deadline: Instant,
    ) -> BatchOutcome {
        if Instant::now() >= deadline {
            warn!(student_id = %id, "Skipped after batch deadline");
            return BatchOutcome::failed(id.clone(), DEADLINE_EXCEEDED);
        }

        let attempt = async {
            let report = self
                .generator
                .generate_for_student(provider, id, ctx, self.config.fetch_timeout)
                .await?;
            if let Some(sink) = &self.sink {
                sink.accept(&report).await?;
            }
            Ok::<_, ReportError>(())
        };

        match tokio::time::timeout_at(deadline, attempt).await {
            Ok(Ok(())) => BatchOutcome::succeeded(id.clone()),
            Ok(Err(err)) => {
                warn!(student_id = %id, error = %err, "Report generation failed");
                BatchOutcome::failed(id.clone(), err.to_string())
            }
            Err(_) => {
                warn!(student_id = %id, "Batch deadline exceeded");
                BatchOutcome::failed(id.clone(), DEADLINE_EXCEEDED)
            }
        }
    }
}
