// Shared fixtures for the orchestrator tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use tickweave::{
    Bar, BarSeries, BarsRequest, Tickweave, TickweaveConnector, TickweaveError, TradeRecord,
    TradeSeries, TradesRequest,
};
use tickweave_core::connector::{BarsProvider, TradesProvider};
use tickweave_mock::MockConnector;

pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";

/// First day used across scenarios (a Monday).
pub fn d0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

/// `d0` plus `n` calendar days.
pub fn d(n: u64) -> NaiveDate {
    d0().checked_add_days(Days::new(n)).unwrap()
}

/// Mock plus an orchestrator driving it with default limits.
pub fn mock_tw(mock: MockConnector) -> (Arc<MockConnector>, Tickweave) {
    let mock = Arc::new(mock);
    let raw: Arc<dyn TickweaveConnector> = mock.clone();
    let tw = Tickweave::builder().with_connector(raw).build().unwrap();
    (mock, tw)
}

/// Orchestrator around any connector, with an optional trade page ceiling.
pub fn tw_for(connector: Arc<dyn TickweaveConnector>, ceiling: Option<u32>) -> Tickweave {
    let mut builder = Tickweave::builder().with_connector(connector);
    if let Some(c) = ceiling {
        builder = builder.trade_page_ceiling(c);
    }
    builder.build().unwrap()
}

/// Serves one bar per requested day, stamped at 00:30 UTC the next day.
///
/// In winter that is 19:30 New York time, an after-hours bar of the
/// requested market day.
pub struct EveningBars;

pub fn evening_ts(day: NaiveDate) -> DateTime<Utc> {
    day.succ_opt().unwrap().and_hms_opt(0, 30, 0).unwrap().and_utc()
}

impl TickweaveConnector for EveningBars {
    fn name(&self) -> &'static str {
        "evening-bars"
    }

    fn as_bars_provider(&self) -> Option<&dyn BarsProvider> {
        Some(self)
    }
}

#[async_trait]
impl BarsProvider for EveningBars {
    async fn bars(&self, req: BarsRequest) -> Result<BarSeries, TickweaveError> {
        let bars = req
            .from
            .iter_days()
            .take_while(|day| *day <= req.to)
            .map(|day| Bar {
                ts: evening_ts(day),
                open: Decimal::ONE,
                high: Decimal::TWO,
                low: Decimal::ONE,
                close: Decimal::TWO,
                volume: Decimal::from(100),
                vwap: None,
                trade_count: 1,
            })
            .collect();
        Ok(BarSeries::from_bars(req.symbol, req.adjusted, bars))
    }
}

/// Trades connector replaying canned pages in order.
///
/// Each page reports its last timestamp as the cursor. Asking for more pages
/// than were scripted is an error.
pub struct ScriptedTrades {
    pages: Mutex<VecDeque<Vec<i64>>>,
    requests: Mutex<Vec<TradesRequest>>,
}

impl ScriptedTrades {
    /// Pages given as trade timestamps.
    pub fn new(pages: Vec<Vec<i64>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<TradesRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl TickweaveConnector for ScriptedTrades {
    fn name(&self) -> &'static str {
        "scripted-trades"
    }

    fn as_trades_provider(&self) -> Option<&dyn TradesProvider> {
        Some(self)
    }
}

#[async_trait]
impl TradesProvider for ScriptedTrades {
    async fn trades(&self, req: TradesRequest) -> Result<(TradeSeries, Option<i64>), TickweaveError> {
        self.requests.lock().unwrap().push(req.clone());
        let Some(page) = self.pages.lock().unwrap().pop_front() else {
            return Err(TickweaveError::Other("no more scripted pages".into()));
        };
        let cursor = page.last().copied();
        let trades = page
            .into_iter()
            .map(|ts| TradeRecord::new(ts, Decimal::ONE_HUNDRED, 100))
            .collect();
        Ok((TradeSeries::from_trades(req.symbol, req.date, trades), cursor))
    }
}
