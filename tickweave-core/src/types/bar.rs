use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TickweaveError;
use crate::frame::BarFrame;
use crate::timeseries::merge::merge_bars;

/// One aggregate bar, keyed by the start of its window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Start of the aggregation window.
    pub ts: DateTime<Utc>,
    /// Opening price.
    pub open: Decimal,
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume.
    pub volume: Decimal,
    /// Volume-weighted average price, when reported.
    pub vwap: Option<Decimal>,
    /// Number of trades aggregated into the bar.
    pub trade_count: u64,
}

/// Ordered, de-duplicated bars for one symbol.
///
/// The bar sequence is always strictly increasing by `ts`. The columnar
/// projection returned by [`BarSeries::frame`] is built on first access and
/// dropped by every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "BarSeriesRepr", into = "BarSeriesRepr")]
pub struct BarSeries {
    symbol: String,
    adjusted: bool,
    bars: Vec<Bar>,
    frame: OnceLock<BarFrame>,
}

#[derive(Serialize, Deserialize)]
struct BarSeriesRepr {
    symbol: String,
    adjusted: bool,
    bars: Vec<Bar>,
}

impl From<BarSeriesRepr> for BarSeries {
    fn from(r: BarSeriesRepr) -> Self {
        Self::from_bars(r.symbol, r.adjusted, r.bars)
    }
}

impl From<BarSeries> for BarSeriesRepr {
    fn from(s: BarSeries) -> Self {
        Self {
            symbol: s.symbol,
            adjusted: s.adjusted,
            bars: s.bars,
        }
    }
}

impl PartialEq for BarSeries {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.adjusted == other.adjusted && self.bars == other.bars
    }
}

impl Eq for BarSeries {}

impl BarSeries {
    /// Create an empty series.
    pub fn new(symbol: impl Into<String>, adjusted: bool) -> Self {
        Self {
            symbol: symbol.into(),
            adjusted,
            bars: Vec::new(),
            frame: OnceLock::new(),
        }
    }

    /// Build a series from bars in any order.
    ///
    /// Bars are sorted by `ts`; for duplicate timestamps the later bar in
    /// `bars` wins.
    pub fn from_bars(symbol: impl Into<String>, adjusted: bool, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            adjusted,
            bars: merge_bars([bars]),
            frame: OnceLock::new(),
        }
    }

    /// Ticker symbol the bars belong to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Whether prices are split-adjusted.
    #[must_use]
    pub const fn is_adjusted(&self) -> bool {
        self.adjusted
    }

    /// Bars in ascending timestamp order.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Consume the series and return its bars.
    #[must_use]
    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }

    /// Number of bars held.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.bars.len()
    }

    /// Alias of [`BarSeries::query_count`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// True if no bars are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Oldest bar.
    #[must_use]
    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    /// Newest bar.
    #[must_use]
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Merge `other` into this series.
    ///
    /// On timestamp collisions the bar from `other` replaces the held one. The
    /// result stays sorted. The series is only marked adjusted if both sides
    /// are.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `other` belongs to a different symbol.
    pub fn merge(&mut self, other: Self) -> Result<(), TickweaveError> {
        if other.symbol != self.symbol {
            return Err(TickweaveError::InvalidArg(format!(
                "cannot merge {} bars into {} series",
                other.symbol, self.symbol
            )));
        }
        let held = std::mem::take(&mut self.bars);
        self.bars = merge_bars([held, other.bars]);
        self.adjusted &= other.adjusted;
        self.invalidate();
        Ok(())
    }

    /// Insert a single bar at the tail.
    ///
    /// Appends when `bar` is newer than the last bar, replaces the last bar
    /// when the timestamps are equal.
    ///
    /// # Errors
    /// Returns `UnsupportedInsertionOrder` when `bar` is older than the last bar.
    pub fn upsert_bar(&mut self, bar: Bar) -> Result<(), TickweaveError> {
        match self.bars.last_mut() {
            Some(last) if bar.ts < last.ts => {
                return Err(TickweaveError::UnsupportedInsertionOrder {
                    last: last.ts,
                    attempted: bar.ts,
                });
            }
            Some(last) if bar.ts == last.ts => *last = bar,
            _ => self.bars.push(bar),
        }
        self.invalidate();
        Ok(())
    }

    /// Drop every bar that starts before `since`.
    pub fn retain_since(&mut self, since: DateTime<Utc>) {
        let cut = self.bars.partition_point(|b| b.ts < since);
        if cut > 0 {
            self.bars.drain(..cut);
            self.invalidate();
        }
    }

    /// Columnar projection of the bars, built lazily and cached until the
    /// next mutation.
    pub fn frame(&self) -> &BarFrame {
        self.frame.get_or_init(|| BarFrame::from_bars(&self.bars))
    }

    /// Whether a projection is currently cached.
    #[must_use]
    pub fn is_frame_cached(&self) -> bool {
        self.frame.get().is_some()
    }

    fn invalidate(&mut self) {
        self.frame.take();
    }
}
