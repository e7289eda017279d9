//! Response shapes of the REST endpoints and their mapping into core types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use tickweave_core::{Bar, Ticker, TickerDetail, TickerList, TickweaveError, TradeRecord};

fn dec(v: f64, field: &str) -> Result<Decimal, TickweaveError> {
    Decimal::try_from(v).map_err(|e| TickweaveError::Data(format!("{field}={v}: {e}")))
}

/// Counts the service sends as JSON numbers, integral or not (`3571`,
/// `3571.0`, `1.2e12`). Values that are not a finite, non-negative whole
/// number in range of `T` are dropped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole<T: TryFrom<u64>>(v: Option<f64>) -> Option<T> {
    let v = v?.round();
    if !v.is_finite() || v < 0.0 || v >= u64::MAX as f64 {
        return None;
    }
    T::try_from(v as u64).ok()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggsResponse {
    #[serde(default)]
    pub adjusted: Option<bool>,
    #[serde(default)]
    pub results: Option<Vec<WireBar>>,
}

#[derive(Debug, Deserialize)]
pub struct WireBar {
    pub v: f64,
    pub o: f64,
    pub c: f64,
    pub h: f64,
    pub l: f64,
    #[serde(default)]
    pub vw: Option<f64>,
    pub t: i64,
    #[serde(default)]
    pub n: Option<u64>,
}

impl WireBar {
    pub fn into_bar(self) -> Result<Bar, TickweaveError> {
        Ok(Bar {
            ts: DateTime::from_timestamp_millis(self.t)
                .ok_or_else(|| TickweaveError::Data(format!("bar timestamp out of range: {}", self.t)))?,
            open: dec(self.o, "o")?,
            high: dec(self.h, "h")?,
            low: dec(self.l, "l")?,
            close: dec(self.c, "c")?,
            volume: dec(self.v, "v")?,
            vwap: self.vw.map(|v| dec(v, "vw")).transpose()?,
            trade_count: self.n.unwrap_or(0),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TradesResponse {
    #[serde(default)]
    pub results_count: Option<u64>,
    #[serde(default)]
    pub results: Option<Vec<WireTrade>>,
}

#[derive(Debug, Deserialize)]
pub struct WireTrade {
    #[serde(rename = "I", default)]
    pub original_id: Option<u64>,
    #[serde(default)]
    pub x: Option<u32>,
    pub p: f64,
    #[serde(default)]
    pub e: Option<u32>,
    #[serde(default)]
    pub r: Option<u32>,
    pub t: i64,
    #[serde(default)]
    pub y: Option<i64>,
    #[serde(default)]
    pub f: Option<i64>,
    #[serde(default)]
    pub q: Option<u64>,
    #[serde(default)]
    pub c: Option<Vec<u32>>,
    pub s: u64,
}

impl WireTrade {
    pub fn into_trade(self) -> Result<TradeRecord, TickweaveError> {
        Ok(TradeRecord {
            ts: self.t,
            price: dec(self.p, "p")?,
            size: self.s,
            sequence_no: self.q,
            exchange_id: self.x,
            original_id: self.original_id,
            correction: self.e,
            reporting_id: self.r,
            quote_ts: self.y,
            report_ts: self.f,
            conditions: self.c.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickersResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub tickers: Vec<WireTicker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTicker {
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub primary_exch: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub codes: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl From<WireTicker> for Ticker {
    fn from(w: WireTicker) -> Self {
        Self {
            symbol: w.ticker,
            name: w.name,
            market: w.market,
            locale: w.locale,
            currency: w.currency,
            active: w.active,
            primary_exchange: w.primary_exch,
            kind: w.kind,
            codes: w.codes.unwrap_or_default(),
            updated: w.updated,
        }
    }
}

impl From<TickersResponse> for TickerList {
    fn from(r: TickersResponse) -> Self {
        Self {
            page: r.page,
            per_page: r.per_page,
            count: r.count,
            tickers: r.tickers.into_iter().map(Ticker::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WireTickerDetail {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub listdate: Option<String>,
    #[serde(default)]
    pub cik: Option<String>,
    #[serde(default)]
    pub bloomberg: Option<String>,
    #[serde(default)]
    pub figi: Option<String>,
    #[serde(default)]
    pub lei: Option<String>,
    #[serde(default)]
    pub sic: Option<f64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub marketcap: Option<f64>,
    #[serde(default)]
    pub employees: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub ceo: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub similar: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<WireTickerDetail> for TickerDetail {
    fn from(w: WireTickerDetail) -> Self {
        Self {
            symbol: w.symbol,
            name: w.name,
            exchange: w.exchange,
            logo: w.logo,
            list_date: w
                .listdate
                .as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
            cik: w.cik,
            bloomberg: w.bloomberg,
            figi: w.figi,
            lei: w.lei,
            sic: whole(w.sic),
            country: w.country,
            industry: w.industry,
            sector: w.sector,
            market_cap: whole(w.marketcap),
            employees: whole(w.employees),
            phone: w.phone,
            ceo: w.ceo,
            url: w.url,
            description: w.description,
            similar: w.similar,
            tags: w.tags,
        }
    }
}
