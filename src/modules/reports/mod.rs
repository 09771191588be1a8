//! Reports module.
//!
//! Generates report cards for one student, returned as a base64 encoded word
//! document, or for a list of students, returned as per-student outcomes.

pub mod controller;
pub mod router;
pub mod service;
