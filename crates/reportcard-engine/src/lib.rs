//! # Report Card Engine
//!
//! Turns student and grade records into populated word report cards.
//!
//! - [`aggregator`]: totals, averages and letter grades
//! - [`placeholders`]: the placeholder map of one report card
//! - [`template`]: `.docx` template parsing and population
//! - [`generator`]: one student's report, from records or through a provider
//! - [`batch`]: many students with per-student failure isolation
//! - [`provider`]: the [`DataProvider`] trait and an in-memory implementation
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use reportcard_engine::{BatchOrchestrator, PlaceholderResolver, ReportGenerator, TemplateStore};
//!
//! let templates = TemplateStore::from_config(&template_config)?;
//! let generator = Arc::new(ReportGenerator::new(templates, PlaceholderResolver::new(school)));
//! let result = BatchOrchestrator::new(generator, batch_config)
//!     .run_batch(&student_ids, &ctx, provider.as_ref())
//!     .await?;
//! ```

pub mod aggregator;
pub mod batch;
pub mod generator;
pub mod placeholders;
pub mod provider;
pub mod template;

pub use aggregator::GradeAggregator;
pub use batch::{BatchOrchestrator, DocumentSink, SinkFuture};
pub use generator::{GeneratedReport, ReportGenerator, report_filename};
pub use placeholders::{KNOWN_PLACEHOLDERS, PlaceholderMap, PlaceholderResolver};
pub use provider::{DataProvider, InMemoryProvider, ProviderFuture, fetch_with_timeout};
pub use template::{Template, TemplateEngine, TemplateStore};
