//! Diagnostic endpoints for operators: template and data store checks.

pub mod controller;
pub mod router;
pub mod service;
