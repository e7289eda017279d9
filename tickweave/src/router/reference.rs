use tickweave_core::{TickerDetail, TickerList, TickerListQuery, TickweaveError};

use crate::Tickweave;

impl Tickweave {
    /// List tickers matching `query`.
    ///
    /// # Errors
    /// Returns `Unsupported` when the connector has no listing capability,
    /// otherwise propagates the connector error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tickweave::router::reference::ticker_list", skip(self), err)
    )]
    pub async fn ticker_list(&self, query: &TickerListQuery) -> Result<TickerList, TickweaveError> {
        self.ticker_list_provider()?.ticker_list(query).await
    }

    /// Company profile for `symbol`.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown symbol and `Unsupported` when the
    /// connector has no detail capability.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tickweave::router::reference::ticker_detail", skip(self), err)
    )]
    pub async fn ticker_detail(&self, symbol: &str) -> Result<TickerDetail, TickweaveError> {
        if symbol.trim().is_empty() {
            return Err(TickweaveError::InvalidArg("symbol must not be empty".into()));
        }
        self.ticker_detail_provider()?.ticker_detail(symbol).await
    }
}
