use std::sync::OnceLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TickweaveError;
use crate::frame::TradeFrame;

/// One trade tick.
///
/// Timestamps are nanoseconds since the UNIX epoch, the unit the trades
/// endpoint uses for its pagination cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// SIP timestamp of the trade.
    pub ts: i64,
    /// Trade price.
    pub price: Decimal,
    /// Trade size in shares.
    pub size: u64,
    /// Sequence number assigned by the feed; breaks ties between equal timestamps.
    pub sequence_no: Option<u64>,
    /// Exchange the trade was executed on.
    pub exchange_id: Option<u32>,
    /// Identifier of the trade this one corrects, if any.
    pub original_id: Option<u64>,
    /// Correction indicator.
    pub correction: Option<u32>,
    /// Trade reporting facility.
    pub reporting_id: Option<u32>,
    /// Participant timestamp.
    pub quote_ts: Option<i64>,
    /// Reporting facility timestamp.
    pub report_ts: Option<i64>,
    /// Trade condition codes.
    pub conditions: Vec<u32>,
}

impl TradeRecord {
    /// Minimal record with only the required fields populated.
    #[must_use]
    pub const fn new(ts: i64, price: Decimal, size: u64) -> Self {
        Self {
            ts,
            price,
            size,
            sequence_no: None,
            exchange_id: None,
            original_id: None,
            correction: None,
            reporting_id: None,
            quote_ts: None,
            report_ts: None,
            conditions: Vec::new(),
        }
    }
}

/// Trades for one symbol-day in the order the service delivered them.
///
/// `result_count` tracks how many distinct trades have been ingested across
/// every page consumed so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeSeries {
    symbol: String,
    date: NaiveDate,
    trades: Vec<TradeRecord>,
    result_count: u64,
    #[serde(skip)]
    frame: OnceLock<TradeFrame>,
}

impl PartialEq for TradeSeries {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.date == other.date
            && self.result_count == other.result_count
            && self.trades == other.trades
    }
}

impl Eq for TradeSeries {}

impl TradeSeries {
    /// Create an empty series.
    pub fn new(symbol: impl Into<String>, date: NaiveDate) -> Self {
        Self::from_trades(symbol, date, Vec::new())
    }

    /// Build a series from one page; `result_count` is the page length.
    pub fn from_trades(symbol: impl Into<String>, date: NaiveDate, trades: Vec<TradeRecord>) -> Self {
        let result_count = trades.len() as u64;
        Self {
            symbol: symbol.into(),
            date,
            trades,
            result_count,
            frame: OnceLock::new(),
        }
    }

    /// Override the reported result count.
    #[must_use]
    pub const fn with_result_count(mut self, result_count: u64) -> Self {
        self.result_count = result_count;
        self
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Trading day.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Trades in delivery order.
    #[must_use]
    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Consume the series and return its trades.
    #[must_use]
    pub fn into_trades(self) -> Vec<TradeRecord> {
        self.trades
    }

    /// Cumulative number of distinct trades ingested.
    #[must_use]
    pub const fn result_count(&self) -> u64 {
        self.result_count
    }

    /// Number of trades held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// True if no trades are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Timestamp of the last trade, used as the next page cursor.
    #[must_use]
    pub fn last_ts(&self) -> Option<i64> {
        self.trades.last().map(|t| t.ts)
    }

    /// Append a continuation page.
    ///
    /// The service repeats the boundary trade at the start of each page, so the
    /// first trade of `other` must carry the same timestamp as the last trade
    /// held here. That record is dropped and the rest appended.
    ///
    /// # Errors
    /// Returns `ContinuationMismatch` when the boundary timestamps differ or
    /// either side is empty, and `InvalidArg` when `other` belongs to another
    /// symbol or day.
    pub fn consume(&mut self, other: Self) -> Result<(), TickweaveError> {
        if other.symbol != self.symbol || other.date != self.date {
            return Err(TickweaveError::InvalidArg(format!(
                "cannot append {} trades for {} to {} series for {}",
                other.symbol, other.date, self.symbol, self.date
            )));
        }
        let expected = self.last_ts();
        let found = other.trades.first().map(|t| t.ts);
        match (expected, found) {
            (Some(e), Some(f)) if e == f => {}
            _ => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    symbol = %self.symbol,
                    date = %self.date,
                    ?expected,
                    ?found,
                    "trade page does not continue held series"
                );
                return Err(TickweaveError::ContinuationMismatch { expected, found });
            }
        }
        self.trades.extend(other.trades.into_iter().skip(1));
        self.result_count = (self.result_count + other.result_count).saturating_sub(1);
        self.frame.take();
        Ok(())
    }

    /// Columnar projection of the trades, cached until the next mutation.
    pub fn frame(&self) -> &TradeFrame {
        self.frame.get_or_init(|| TradeFrame::from_trades(&self.trades))
    }

    /// Whether a projection is currently cached.
    #[must_use]
    pub fn is_frame_cached(&self) -> bool {
        self.frame.get().is_some()
    }
}
