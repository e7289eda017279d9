use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tickweave_core::{Bar, DateWindow};

fn symbol_offset(symbol: &str) -> i64 {
    symbol.bytes().map(i64::from).sum::<i64>() * 10
}

/// One deterministic bar for `symbol` on `day`, stamped at midnight UTC.
pub fn daily_bar(symbol: &str, day: NaiveDate) -> Bar {
    let close = 10_000 + symbol_offset(symbol) + i64::from(day.num_days_from_ce() % 1000);
    Bar {
        ts: day.and_time(NaiveTime::MIN).and_utc(),
        open: Decimal::new(close - 50, 2),
        high: Decimal::new(close + 100, 2),
        low: Decimal::new(close - 100, 2),
        close: Decimal::new(close, 2),
        volume: Decimal::from(1_000_000 + i64::from(day.day()) * 1_000),
        vwap: Some(Decimal::new(close - 10, 2)),
        trade_count: 5_000 + u64::from(day.day()),
    }
}

/// One bar per calendar day of `window`, oldest first.
pub fn bars_for(symbol: &str, window: DateWindow) -> Vec<Bar> {
    window
        .from
        .iter_days()
        .take_while(|d| *d <= window.to)
        .map(|d| daily_bar(symbol, d))
        .collect()
}
