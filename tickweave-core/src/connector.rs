use async_trait::async_trait;

use crate::{
    BarSeries, BarsRequest, TickerDetail, TickerList, TickerListQuery, TickweaveError, TradeSeries,
    TradesRequest,
};
pub use tickweave_types::ConnectorKey;

/// Focused role trait for connectors that serve aggregate bars.
#[async_trait]
pub trait BarsProvider: Send + Sync {
    /// Fetch bars for one window with a single remote call.
    ///
    /// Implementations must not split the request themselves; the orchestrator
    /// hands over windows that already respect the service's span limit.
    async fn bars(&self, req: BarsRequest) -> Result<BarSeries, TickweaveError>;
}

/// Focused role trait for connectors that serve trade ticks.
#[async_trait]
pub trait TradesProvider: Send + Sync {
    /// Fetch one page of trades.
    ///
    /// Returns the page together with the timestamp of its last trade, or
    /// `None` when the page is empty. That timestamp is the cursor for the next
    /// page.
    async fn trades(&self, req: TradesRequest) -> Result<(TradeSeries, Option<i64>), TickweaveError>;
}

/// Focused role trait for connectors that list reference tickers.
#[async_trait]
pub trait TickerListProvider: Send + Sync {
    /// Fetch one page of tickers matching `query`.
    async fn ticker_list(&self, query: &TickerListQuery) -> Result<TickerList, TickweaveError>;
}

/// Focused role trait for connectors that serve company details.
#[async_trait]
pub trait TickerDetailProvider: Send + Sync {
    /// Fetch the company profile for `symbol`.
    async fn ticker_detail(&self, symbol: &str) -> Result<TickerDetail, TickweaveError>;
}

/// Main connector trait: identity plus capability discovery.
///
/// Connectors advertise each capability by overriding the matching
/// `as_*_provider` accessor to return `Some(self)`.
pub trait TickweaveConnector: Send + Sync {
    /// A stable identifier (e.g., "tickweave-polygon").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise bars capability.
    fn as_bars_provider(&self) -> Option<&dyn BarsProvider> {
        None
    }

    /// Advertise trades capability.
    fn as_trades_provider(&self) -> Option<&dyn TradesProvider> {
        None
    }

    /// Advertise ticker listing capability.
    fn as_ticker_list_provider(&self) -> Option<&dyn TickerListProvider> {
        None
    }

    /// Advertise ticker detail capability.
    fn as_ticker_detail_provider(&self) -> Option<&dyn TickerDetailProvider> {
        None
    }
}

/// Generate `as_*_provider` accessors for a wrapper that implements
/// `TickweaveConnector` by delegating to an inner field.
///
/// The wrapper must implement every role trait itself; an accessor returns the
/// wrapper only when the inner connector advertises the capability.
#[macro_export]
macro_rules! tickweave_connector_accessors {
    ($inner:ident) => {
        fn as_bars_provider(&self) -> Option<&dyn $crate::connector::BarsProvider> {
            if self.$inner.as_bars_provider().is_some() {
                Some(self as &dyn $crate::connector::BarsProvider)
            } else {
                None
            }
        }
        fn as_trades_provider(&self) -> Option<&dyn $crate::connector::TradesProvider> {
            if self.$inner.as_trades_provider().is_some() {
                Some(self as &dyn $crate::connector::TradesProvider)
            } else {
                None
            }
        }
        fn as_ticker_list_provider(
            &self,
        ) -> Option<&dyn $crate::connector::TickerListProvider> {
            if self.$inner.as_ticker_list_provider().is_some() {
                Some(self as &dyn $crate::connector::TickerListProvider)
            } else {
                None
            }
        }
        fn as_ticker_detail_provider(
            &self,
        ) -> Option<&dyn $crate::connector::TickerDetailProvider> {
            if self.$inner.as_ticker_detail_provider().is_some() {
                Some(self as &dyn $crate::connector::TickerDetailProvider)
            } else {
                None
            }
        }
    };
}
