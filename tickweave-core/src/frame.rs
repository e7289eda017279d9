use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::{Bar, TradeRecord};

fn f(v: Decimal) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}

/// Columnar view of a bar series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarFrame {
    /// Window start, milliseconds since the epoch.
    pub ts_ms: Vec<i64>,
    /// Opening prices.
    pub open: Vec<f64>,
    /// Highest prices.
    pub high: Vec<f64>,
    /// Lowest prices.
    pub low: Vec<f64>,
    /// Closing prices.
    pub close: Vec<f64>,
    /// Volumes.
    pub volume: Vec<f64>,
    /// Volume-weighted average prices.
    pub vwap: Vec<Option<f64>>,
    /// Trade counts.
    pub trade_count: Vec<u64>,
}

impl BarFrame {
    /// Project bars into columns.
    #[must_use]
    pub fn from_bars(bars: &[Bar]) -> Self {
        let mut out = Self {
            ts_ms: Vec::with_capacity(bars.len()),
            open: Vec::with_capacity(bars.len()),
            high: Vec::with_capacity(bars.len()),
            low: Vec::with_capacity(bars.len()),
            close: Vec::with_capacity(bars.len()),
            volume: Vec::with_capacity(bars.len()),
            vwap: Vec::with_capacity(bars.len()),
            trade_count: Vec::with_capacity(bars.len()),
        };
        for b in bars {
            out.ts_ms.push(b.ts.timestamp_millis());
            out.open.push(f(b.open));
            out.high.push(f(b.high));
            out.low.push(f(b.low));
            out.close.push(f(b.close));
            out.volume.push(f(b.volume));
            out.vwap.push(b.vwap.map(f));
            out.trade_count.push(b.trade_count);
        }
        out
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ts_ms.len()
    }

    /// True if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ts_ms.is_empty()
    }

    /// Convert into a polars `DataFrame`.
    ///
    /// # Errors
    /// Propagates polars construction errors.
    #[cfg(feature = "dataframe")]
    pub fn to_dataframe(&self) -> polars::prelude::PolarsResult<polars::prelude::DataFrame> {
        use polars::prelude::*;
        df!(
            "ts" => &self.ts_ms,
            "open" => &self.open,
            "high" => &self.high,
            "low" => &self.low,
            "close" => &self.close,
            "volume" => &self.volume,
            "vwap" => &self.vwap,
            "trade_count" => &self.trade_count,
        )
    }
}

/// Columnar view of a trade series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeFrame {
    /// Trade timestamps in nanoseconds.
    pub ts_ns: Vec<i64>,
    /// Prices.
    pub price: Vec<f64>,
    /// Sizes.
    pub size: Vec<u64>,
    /// Feed sequence numbers.
    pub sequence_no: Vec<Option<u64>>,
    /// Exchange ids.
    pub exchange_id: Vec<Option<u32>>,
}

impl TradeFrame {
    /// Project trades into columns.
    #[must_use]
    pub fn from_trades(trades: &[TradeRecord]) -> Self {
        Self {
            ts_ns: trades.iter().map(|t| t.ts).collect(),
            price: trades.iter().map(|t| f(t.price)).collect(),
            size: trades.iter().map(|t| t.size).collect(),
            sequence_no: trades.iter().map(|t| t.sequence_no).collect(),
            exchange_id: trades.iter().map(|t| t.exchange_id).collect(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ts_ns.len()
    }

    /// True if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ts_ns.is_empty()
    }

    /// Convert into a polars `DataFrame`.
    ///
    /// # Errors
    /// Propagates polars construction errors.
    #[cfg(feature = "dataframe")]
    pub fn to_dataframe(&self) -> polars::prelude::PolarsResult<polars::prelude::DataFrame> {
        use polars::prelude::*;
        df!(
            "ts" => &self.ts_ns,
            "price" => &self.price,
            "size" => &self.size,
            "sequence_no" => &self.sequence_no,
            "exchange_id" => &self.exchange_id,
        )
    }
}
