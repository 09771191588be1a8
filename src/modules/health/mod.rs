//! Liveness check.

pub mod controller;
pub mod router;
