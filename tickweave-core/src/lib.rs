//! tickweave-core
//!
//! Core types, traits, and utilities shared across the tickweave crates.
//!
//! - `types`: bars, trades, reference records, and per-call request structs.
//! - `frame`: columnar projections cached by the series types.
//! - `connector`: the `TickweaveConnector` trait and capability role traits.
//! - `middleware`: the `Middleware` trait for connector wrappers.
//! - `timeseries`: date-window splitting and bar merging.
//!
//! Async runtime
//! -------------
//! Connector traits are `async_trait` based and runtime agnostic; the
//! orchestrator and the bundled connectors run on Tokio.
#![warn(missing_docs)]

/// Connector capability traits and the primary `TickweaveConnector` interface.
pub mod connector;
/// Columnar projections of bar and trade series.
pub mod frame;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Date-window splitting and bar merging.
pub mod timeseries;
pub mod types;

pub use connector::TickweaveConnector;
pub use frame::{BarFrame, TradeFrame};
pub use middleware::Middleware;
pub use tickweave_types::{
    CacheConfig, Capability, ConnectorKey, FetchConfig, SortOrder, Timespan, TickweaveError,
};
pub use timeseries::merge::merge_bars;
pub use timeseries::window::{BackwardWindows, DateWindow, WindowSplitter};
pub use types::*;
