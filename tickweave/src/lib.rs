//! Tickweave assembles long market-data histories from a service that caps
//! every request.
//!
//! Overview
//! - Splits a requested date range into windows the service accepts and
//!   fetches them one after another, oldest first.
//! - Folds each window into a single ascending, de-duplicated `BarSeries`.
//! - Walks the trades cursor for a symbol-day, dropping the boundary trade
//!   the service repeats at the start of every continuation page.
//! - Keeps a lookback window fresh with [`IncrementalWindowFetcher`], either
//!   by recomputing it or by fetching only the new tail.
//!
//! Key behaviors and trade-offs
//! - Fetches are strictly sequential. A failing window or page aborts the
//!   whole call and nothing partial is returned.
//! - Nothing is retried here; retry and rate-limit policy belong to the
//!   transport.
//! - The connector is injected. Wrap it with `tickweave_middleware` layers
//!   (e.g. the reference-data cache) before handing it over.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickweave::{Tickweave, Timespan};
//! use tickweave_polygon::PolygonConnector;
//!
//! let polygon = PolygonConnector::from_env()?.build()?;
//! let tw = Tickweave::builder().with_connector(polygon).build()?;
//!
//! let from = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let to = chrono::NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
//! let bars = tw.fetch_range("AAPL", Timespan::Minute, from, to).await?;
//! println!("{} bars", bars.len());
//! ```
//!
//! See `tickweave/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod incremental;
mod router;

pub use core::{Tickweave, TickweaveBuilder};
pub use incremental::{Clock, IncrementalWindowFetcher, Lookback, MarketClock, RefreshMode};

pub use tickweave_middleware::{CacheMiddleware, ConnectorBuilder};

// Re-export core types for convenience
pub use tickweave_core::{
    AggregateEvent, Bar, BarFrame, BarSeries, BarsRequest, CacheConfig, Capability, DateWindow,
    FetchConfig, SortOrder, Ticker, TickerDetail, TickerList, TickerListQuery, Timespan,
    TickweaveConnector, TickweaveError, TradeFrame, TradeRecord, TradeSeries, TradesRequest,
    WindowSplitter, market_date, market_day_start,
};
