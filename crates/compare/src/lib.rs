//! `tableverify-compare` — Tolerance-aware row comparison engine for
//! migration validation.
//!
//! Pure engine crate: receives one source row and zero-or-one matching
//! target row, returns an optional discrepancy. No CLI or IO dependencies;
//! retrieval, joining, and parallel traversal belong to the caller.

pub mod compare;
pub mod config;
pub mod error;
pub mod model;
pub mod report;

pub use compare::compare;
pub use config::ComparisonConfig;
pub use error::CompareError;
pub use model::{CompareSummary, Discrepancy, DriftEntry, Finding, Record, Value};
pub use report::compute_summary;
