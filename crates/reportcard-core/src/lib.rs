//! # Report Card Core
//!
//! Core error types shared by every crate of the report card service.
//!
//! - [`errors::ReportError`]: the domain failure taxonomy raised by the
//!   generation engine and the data providers
//! - [`errors::AppError`]: the HTTP-facing error with an `IntoResponse`
//!   implementation, built from a `ReportError` or any `anyhow` error
//!
//! # Example
//!
//! ```ignore
//! use reportcard_core::{AppError, ReportError};
//!
//! let error: AppError = ReportError::NotFound.into();
//! assert_eq!(error.status, axum::http::StatusCode::NOT_FOUND);
//! ```

pub mod errors;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse, ReportError};
