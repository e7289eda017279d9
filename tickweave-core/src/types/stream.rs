use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Bar, BarSeries, TickweaveError};

/// Per-minute aggregate pushed by the streaming feed (`ev = "AM"`).
///
/// Field names follow the feed's wire format; timestamps are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEvent {
    /// Ticker symbol.
    #[serde(rename = "sym")]
    pub symbol: String,
    /// Event type tag.
    #[serde(rename = "ev")]
    pub event_type: String,
    /// Volume in this window.
    #[serde(rename = "v")]
    pub volume: f64,
    /// Accumulated volume for the day.
    #[serde(rename = "av", default)]
    pub volume_today: f64,
    /// Official opening price of the day.
    #[serde(rename = "op", default)]
    pub official_open: Option<f64>,
    /// Volume-weighted average price of the window.
    #[serde(rename = "vw", default)]
    pub vwap: Option<f64>,
    /// Opening price.
    #[serde(rename = "o")]
    pub open: f64,
    /// Closing price.
    #[serde(rename = "c")]
    pub close: f64,
    /// Highest price.
    #[serde(rename = "h")]
    pub high: f64,
    /// Lowest price.
    #[serde(rename = "l")]
    pub low: f64,
    /// Day's volume-weighted average price.
    #[serde(rename = "a", default)]
    pub average: Option<f64>,
    /// Window start (ms).
    #[serde(rename = "s")]
    pub start_ms: i64,
    /// Window end (ms).
    #[serde(rename = "e")]
    pub end_ms: i64,
}

fn dec(v: f64, field: &str) -> Result<Decimal, TickweaveError> {
    Decimal::try_from(v).map_err(|e| TickweaveError::Data(format!("{field}: {e}")))
}

impl AggregateEvent {
    /// Window start as a UTC instant.
    ///
    /// # Errors
    /// Returns `Data` if the timestamp is out of range.
    pub fn start(&self) -> Result<DateTime<Utc>, TickweaveError> {
        DateTime::from_timestamp_millis(self.start_ms)
            .ok_or_else(|| TickweaveError::Data(format!("bad window start {}", self.start_ms)))
    }

    /// Convert into a bar that counts as a single trade.
    ///
    /// # Errors
    /// Returns `Data` if a price or the timestamp cannot be represented.
    pub fn to_bar(&self) -> Result<Bar, TickweaveError> {
        Ok(Bar {
            ts: self.start()?,
            open: dec(self.open, "open")?,
            high: dec(self.high, "high")?,
            low: dec(self.low, "low")?,
            close: dec(self.close, "close")?,
            volume: dec(self.volume, "volume")?,
            vwap: self.vwap.map(|v| dec(v, "vwap")).transpose()?,
            trade_count: 1,
        })
    }
}

impl BarSeries {
    /// Apply a live aggregate to the tail of the series.
    ///
    /// # Errors
    /// Returns `InvalidArg` for another symbol's event, `Data` for an
    /// unrepresentable event, and `UnsupportedInsertionOrder` when the event
    /// is older than the last held bar.
    pub fn upsert_aggregate(&mut self, event: &AggregateEvent) -> Result<(), TickweaveError> {
        if event.symbol != self.symbol() {
            return Err(TickweaveError::InvalidArg(format!(
                "aggregate for {} applied to {} series",
                event.symbol,
                self.symbol()
            )));
        }
        self.upsert_bar(event.to_bar()?)
    }
}
