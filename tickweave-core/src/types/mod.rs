//! Canonical record types.
//!
//! Every record type has exactly one schema here; connector wire formats are
//! private to the connector and mapped into these types.

use chrono::TimeZone;

mod bar;
mod reference;
mod request;
mod stream;
mod trade;

pub use bar::{Bar, BarSeries};
pub use reference::{Ticker, TickerDetail, TickerList, TickerListQuery};
pub use request::{BarsRequest, TradesRequest};
pub use stream::AggregateEvent;
pub use trade::{TradeRecord, TradeSeries};

pub use chrono::{DateTime, NaiveDate, Utc};
pub use rust_decimal::Decimal;

/// Exchange timezone used to decide which calendar day "today" is.
pub const MARKET_TZ: chrono_tz::Tz = chrono_tz::America::New_York;

/// Calendar date in the market timezone for an instant.
#[must_use]
pub fn market_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&MARKET_TZ).date_naive()
}

/// First instant of `date` in the market timezone.
///
/// Bars stamped at or after this instant belong to `date` or later under
/// [`market_date`].
#[must_use]
pub fn market_day_start(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    MARKET_TZ
        .from_local_datetime(&midnight)
        .earliest()
        .map_or_else(|| midnight.and_utc(), |t| t.with_timezone(&Utc))
}
