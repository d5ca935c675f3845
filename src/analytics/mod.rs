//! Scan analytics derivation.
//!
//! Statistics are never persisted; they are recomputed on demand from a
//! code's full scan history against a caller-supplied reference instant.

pub mod engine;
pub mod models;

pub use engine::compute_analytics;
pub use models::AnalyticsSummary;
