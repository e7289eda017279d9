use std::collections::BTreeMap;

use chrono::NaiveDate;
use tickweave_core::{Ticker, TickerDetail, TickerList, TickerListQuery};

fn ticker(symbol: &str, name: &str, market: &str, exchange: &str, kind: &str) -> Ticker {
    Ticker {
        symbol: symbol.to_string(),
        name: name.to_string(),
        market: market.to_string(),
        locale: "us".to_string(),
        currency: "USD".to_string(),
        active: true,
        primary_exchange: Some(exchange.to_string()),
        kind: Some(kind.to_string()),
        codes: BTreeMap::new(),
        updated: Some("2024-03-01".to_string()),
    }
}

fn all() -> Vec<Ticker> {
    vec![
        ticker("AAPL", "Apple Inc.", "stocks", "NASDAQ", "CS"),
        ticker("MSFT", "Microsoft Corporation", "stocks", "NASDAQ", "CS"),
        ticker("SPY", "SPDR S&P 500 ETF Trust", "stocks", "NYSE ARCA", "ETF"),
        ticker("X:BTCUSD", "Bitcoin - United States Dollar", "crypto", "CRYPTO", "CRYPTO"),
    ]
}

/// Filter the fixed ticker set by market, search text, and active flag.
pub fn ticker_list(query: &TickerListQuery) -> TickerList {
    let needle = query.search.as_deref().map(str::to_ascii_lowercase);
    let tickers: Vec<Ticker> = all()
        .into_iter()
        .filter(|t| query.market.as_deref().is_none_or(|m| m == t.market))
        .filter(|t| query.active.is_none_or(|a| a == t.active))
        .filter(|t| {
            needle.as_deref().is_none_or(|n| {
                t.symbol.to_ascii_lowercase().contains(n) || t.name.to_ascii_lowercase().contains(n)
            })
        })
        .collect();
    TickerList {
        page: 1,
        per_page: 50,
        count: tickers.len() as u64,
        tickers,
    }
}

/// Company detail for the fixed symbols.
pub fn ticker_detail(symbol: &str) -> Option<TickerDetail> {
    match symbol.to_ascii_uppercase().as_str() {
        "AAPL" => Some(TickerDetail {
            symbol: "AAPL".into(),
            name: Some("Apple Inc.".into()),
            exchange: Some("Nasdaq Global Select".into()),
            list_date: NaiveDate::from_ymd_opt(1980, 12, 12),
            cik: Some("0000320193".into()),
            sic: Some(3571),
            country: Some("usa".into()),
            industry: Some("Computer Hardware".into()),
            sector: Some("Technology".into()),
            employees: Some(161_000),
            ceo: Some("Tim Cook".into()),
            url: Some("https://www.apple.com".into()),
            similar: vec!["MSFT".into(), "GOOGL".into()],
            tags: vec!["Technology".into()],
            ..TickerDetail::default()
        }),
        "MSFT" => Some(TickerDetail {
            symbol: "MSFT".into(),
            name: Some("Microsoft Corporation".into()),
            exchange: Some("Nasdaq Global Select".into()),
            list_date: NaiveDate::from_ymd_opt(1986, 3, 13),
            cik: Some("0000789019".into()),
            sector: Some("Technology".into()),
            similar: vec!["AAPL".into()],
            ..TickerDetail::default()
        }),
        _ => None,
    }
}
