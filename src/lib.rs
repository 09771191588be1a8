//! # Report Card API
//!
//! An HTTP service built with Rust and Axum that generates student report
//! cards as word documents. Student and grade records are read from the
//! school's data store (Firestore), aggregated, and written into a `.docx`
//! template by literal placeholder substitution.
//!
//! ## Overview
//!
//! - **Single report**: one student's card, returned base64 encoded
//! - **Batch**: many students at once, with one outcome per student; a failing
//!   student never aborts the others
//! - **Diagnostics**: template inspection and a data store round trip
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── reportcard-core/       # ReportError taxonomy, AppError
//! ├── reportcard-config/     # Environment configuration
//! ├── reportcard-models/     # Records and DTOs
//! ├── reportcard-engine/     # Aggregation, placeholders, DOCX, generation, batch
//! ├── reportcard-firestore/  # Firestore REST data provider
//! └── reportcard-cli/        # Offline generation against a JSON fixture
//! src/
//! ├── modules/
//! │   ├── health/            # Liveness
//! │   ├── reports/           # Single and batch generation
//! │   └── diagnostics/       # Template and data store checks
//! ├── docs.rs                # OpenAPI
//! ├── logging.rs             # Tracing setup and request logging
//! ├── metrics.rs             # Prometheus metrics
//! ├── router.rs              # Main router
//! ├── state.rs               # Shared state
//! └── validator.rs           # Required-field JSON extractor
//! ```
//!
//! Each feature module follows the same structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic
//! - `router.rs`: Axum router configuration
//!
//! ## Quick Start
//!
//! ```bash
//! FIREBASE_PROJECT_ID=ass-sms
//! FIREBASE_API_KEY=your-api-key
//! REPORT_TEMPLATE_PATH=assets/report_template.docx
//! PORT=5000
//! ```
//!
//! When the server is running, API documentation is available at:
//!
//! - Swagger UI: `http://localhost:5000/swagger-ui`
//! - Scalar: `http://localhost:5000/scalar`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use reportcard_config;
pub use reportcard_core;
pub use reportcard_engine;
pub use reportcard_firestore;
pub use reportcard_models;
