use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry of the reference ticker listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    /// Ticker symbol.
    pub symbol: String,
    /// Instrument name.
    pub name: String,
    /// Market the ticker trades on (e.g. "stocks", "crypto").
    pub market: String,
    /// Locale (e.g. "us").
    pub locale: String,
    /// Quote currency.
    pub currency: String,
    /// Whether the ticker is actively traded.
    pub active: bool,
    /// Primary listing exchange.
    pub primary_exchange: Option<String>,
    /// Instrument type code (e.g. "CS" for common stock).
    pub kind: Option<String>,
    /// Cross-reference identifiers keyed by scheme.
    pub codes: BTreeMap<String, String>,
    /// Last update reported by the service.
    pub updated: Option<String>,
}

/// One page of the reference ticker listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerList {
    /// Page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Total number of matches.
    pub count: u64,
    /// Tickers on this page.
    pub tickers: Vec<Ticker>,
}

/// Filters for a ticker listing lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TickerListQuery {
    /// Restrict to one market.
    pub market: Option<String>,
    /// Free-text search over symbol and name.
    pub search: Option<String>,
    /// Restrict to active (or inactive) tickers; `None` means both.
    pub active: Option<bool>,
}

impl TickerListQuery {
    /// Active tickers of one market matching `search`.
    pub fn search(market: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            market: Some(market.into()),
            search: Some(search.into()),
            active: Some(true),
        }
    }
}

/// Company profile for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickerDetail {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    pub name: Option<String>,
    /// Listing exchange name.
    pub exchange: Option<String>,
    /// Logo URL.
    pub logo: Option<String>,
    /// Listing date.
    pub list_date: Option<NaiveDate>,
    /// SEC central index key.
    pub cik: Option<String>,
    /// Bloomberg identifier.
    pub bloomberg: Option<String>,
    /// OpenFIGI identifier.
    pub figi: Option<String>,
    /// Legal entity identifier.
    pub lei: Option<String>,
    /// Standard industrial classification code.
    pub sic: Option<u32>,
    /// Country of incorporation.
    pub country: Option<String>,
    /// Industry.
    pub industry: Option<String>,
    /// Sector.
    pub sector: Option<String>,
    /// Market capitalisation.
    pub market_cap: Option<u64>,
    /// Number of employees.
    pub employees: Option<u64>,
    /// Phone number.
    pub phone: Option<String>,
    /// Chief executive.
    pub ceo: Option<String>,
    /// Company website.
    pub url: Option<String>,
    /// Business description.
    pub description: Option<String>,
    /// Related tickers.
    pub similar: Vec<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
}
