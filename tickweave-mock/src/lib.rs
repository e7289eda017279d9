//! Deterministic connector for CI-safe tests and examples.
//!
//! The symbol `FAIL` always answers with a remote status 500.

use async_trait::async_trait;
use chrono::NaiveDate;
use tickweave_core::connector::{
    BarsProvider, TickerDetailProvider, TickerListProvider, TickweaveConnector, TradesProvider,
};
use tickweave_core::{
    BarSeries, BarsRequest, DateWindow, TickerDetail, TickerList, TickerListQuery, TickweaveError,
    TradeSeries, TradesRequest,
};
use tokio::sync::Mutex;

mod fixtures;

pub use fixtures::bars::daily_bar;
pub use fixtures::trades::{PAGE_CEILING, SPACING_NS, session_open_ns, trade_at};

/// One recorded connector call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// An aggregates call.
    Bars(BarsRequest),
    /// A trades page call.
    Trades(TradesRequest),
    /// A ticker listing lookup.
    TickerList(TickerListQuery),
    /// A ticker detail lookup.
    TickerDetail(String),
}

/// Mock connector serving synthetic bars, trades, and reference data.
pub struct MockConnector {
    trades_per_day: u64,
    fail_on: Vec<NaiveDate>,
    calls: Mutex<Vec<MockCall>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Default mock: 120,000 trades per day, no scheduled failures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trades_per_day: 120_000,
            fail_on: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of synthetic trades per symbol-day.
    #[must_use]
    pub fn with_trades_per_day(mut self, n: u64) -> Self {
        self.trades_per_day = n;
        self
    }

    /// Fail any bars window containing `day`, and trades for that day.
    #[must_use]
    pub fn fail_on(mut self, day: NaiveDate) -> Self {
        self.fail_on.push(day);
        self
    }

    /// Every call received so far, in order.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().await.clone()
    }

    /// Windows of every aggregates call, in order.
    pub async fn bar_windows(&self) -> Vec<DateWindow> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                MockCall::Bars(r) => Some(DateWindow {
                    from: r.from,
                    to: r.to,
                }),
                _ => None,
            })
            .collect()
    }

    /// Every trades page request, in order.
    pub async fn trade_requests(&self) -> Vec<TradesRequest> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                MockCall::Trades(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls.
    pub async fn reset_calls(&self) {
        self.calls.lock().await.clear();
    }

    async fn record(&self, call: MockCall) {
        self.calls.lock().await.push(call);
    }

    fn maybe_fail(symbol: &str, capability: &'static str) -> Result<(), TickweaveError> {
        if symbol == "FAIL" {
            return Err(TickweaveError::remote(
                500,
                format!("forced failure: {capability}"),
            ));
        }
        Ok(())
    }

    fn scheduled_failure(&self, from: NaiveDate, to: NaiveDate) -> Result<(), TickweaveError> {
        if self.fail_on.iter().any(|d| *d >= from && *d <= to) {
            return Err(TickweaveError::remote(503, "scheduled failure"));
        }
        Ok(())
    }
}

impl TickweaveConnector for MockConnector {
    fn name(&self) -> &'static str {
        "tickweave-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_bars_provider(&self) -> Option<&dyn BarsProvider> {
        Some(self as &dyn BarsProvider)
    }

    fn as_trades_provider(&self) -> Option<&dyn TradesProvider> {
        Some(self as &dyn TradesProvider)
    }

    fn as_ticker_list_provider(&self) -> Option<&dyn TickerListProvider> {
        Some(self as &dyn TickerListProvider)
    }

    fn as_ticker_detail_provider(&self) -> Option<&dyn TickerDetailProvider> {
        Some(self as &dyn TickerDetailProvider)
    }
}

#[async_trait]
impl BarsProvider for MockConnector {
    async fn bars(&self, req: BarsRequest) -> Result<BarSeries, TickweaveError> {
        self.record(MockCall::Bars(req.clone())).await;
        Self::maybe_fail(&req.symbol, "bars")?;
        TickweaveError::check_range(req.from, req.to)?;
        self.scheduled_failure(req.from, req.to)?;
        let mut bars = fixtures::bars::bars_for(
            &req.symbol,
            DateWindow {
                from: req.from,
                to: req.to,
            },
        );
        if req.sort == tickweave_core::SortOrder::Desc {
            bars.reverse();
        }
        Ok(BarSeries::from_bars(req.symbol, req.adjusted, bars))
    }
}

#[async_trait]
impl TradesProvider for MockConnector {
    async fn trades(
        &self,
        req: TradesRequest,
    ) -> Result<(TradeSeries, Option<i64>), TickweaveError> {
        self.record(MockCall::Trades(req.clone())).await;
        Self::maybe_fail(&req.symbol, "trades")?;
        self.scheduled_failure(req.date, req.date)?;
        let trades = fixtures::trades::page(&req, self.trades_per_day);
        let last = trades.last().map(|t| t.ts);
        Ok((TradeSeries::from_trades(req.symbol, req.date, trades), last))
    }
}

#[async_trait]
impl TickerListProvider for MockConnector {
    async fn ticker_list(&self, query: &TickerListQuery) -> Result<TickerList, TickweaveError> {
        self.record(MockCall::TickerList(query.clone())).await;
        if let Some(search) = &query.search {
            Self::maybe_fail(search, "ticker-list")?;
        }
        Ok(fixtures::reference::ticker_list(query))
    }
}

#[async_trait]
impl TickerDetailProvider for MockConnector {
    async fn ticker_detail(&self, symbol: &str) -> Result<TickerDetail, TickweaveError> {
        self.record(MockCall::TickerDetail(symbol.to_string())).await;
        Self::maybe_fail(symbol, "ticker-detail")?;
        fixtures::reference::ticker_detail(symbol)
            .ok_or_else(|| TickweaveError::not_found(format!("ticker detail for {symbol}")))
    }
}
