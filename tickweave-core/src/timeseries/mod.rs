//! Time-series utilities shared by connectors and the orchestrator.
//!
//! - `window`: split a date range into service-sized windows, forward or backward
//! - `merge`: combine bar batches with last-writer-wins de-duplication
/// Bar batch merging.
pub mod merge;
/// Date window splitting.
pub mod window;
