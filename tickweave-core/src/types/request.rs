use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{SortOrder, Timespan, TickweaveError};

/// A single aggregates call covering at most one date window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarsRequest {
    /// Ticker symbol.
    pub symbol: String,
    /// Bar unit.
    pub timespan: Timespan,
    /// Bar width in `timespan` units.
    pub multiplier: u32,
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
    /// Requested ordering.
    pub sort: SortOrder,
    /// Whether to request split-adjusted prices.
    pub adjusted: bool,
}

impl BarsRequest {
    /// Request one-minute, adjusted, ascending bars for `[from, to]`.
    ///
    /// # Errors
    /// Returns `InvalidRange` if `from` is after `to`.
    pub fn new(symbol: impl Into<String>, from: NaiveDate, to: NaiveDate) -> Result<Self, TickweaveError> {
        TickweaveError::check_range(from, to)?;
        Ok(Self {
            symbol: symbol.into(),
            timespan: Timespan::Minute,
            multiplier: 1,
            from,
            to,
            sort: SortOrder::Asc,
            adjusted: true,
        })
    }

    /// Same request narrowed to another window.
    #[must_use]
    pub fn with_window(&self, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            ..self.clone()
        }
    }
}

/// A single page of the trades endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradesRequest {
    /// Ticker symbol.
    pub symbol: String,
    /// Trading day.
    pub date: NaiveDate,
    /// Cursor: first trade timestamp (ns) to return.
    pub timestamp_min: Option<i64>,
    /// Last trade timestamp (ns) to return.
    pub timestamp_max: Option<i64>,
    /// Page size.
    pub limit: u32,
    /// Return trades newest first.
    pub reverse: bool,
}

impl TradesRequest {
    /// First page for a symbol-day without bounds.
    pub fn new(symbol: impl Into<String>, date: NaiveDate, limit: u32) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            timestamp_min: None,
            timestamp_max: None,
            limit,
            reverse: false,
        }
    }
}
