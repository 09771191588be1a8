//! # Report Card Firestore
//!
//! [`DataProvider`](reportcard_engine::DataProvider) over the Firestore REST
//! API. Students are read by document id from the students collection; grades
//! are selected with a structured query on `studentId` and `term`.
//!
//! # Example
//!
//! ```ignore
//! use reportcard_config::FirestoreConfig;
//! use reportcard_firestore::FirestoreProvider;
//!
//! let provider = FirestoreProvider::new(FirestoreConfig::from_env());
//! ```

mod provider;
mod values;

pub use provider::FirestoreProvider;
