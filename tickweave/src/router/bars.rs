use chrono::NaiveDate;
use tickweave_core::{BarSeries, BarsRequest, Timespan, TickweaveError, WindowSplitter};

use crate::Tickweave;

impl Tickweave {
    /// Fetch bars for `[from, to]` with the configured defaults for
    /// multiplier, sort order, and adjustment.
    ///
    /// # Errors
    /// Returns `InvalidRange` if `from > to`; otherwise the first connector
    /// error aborts the fetch.
    pub async fn fetch_range(
        &self,
        symbol: &str,
        timespan: Timespan,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<BarSeries, TickweaveError> {
        let mut req = BarsRequest::new(symbol, from, to)?;
        req.timespan = timespan;
        req.multiplier = self.cfg.multiplier;
        req.sort = self.cfg.sort;
        req.adjusted = self.cfg.adjusted;
        self.fetch_bars(req).await
    }

    /// Fetch an arbitrarily long aggregates request.
    ///
    /// Behavior:
    /// - The range is split into windows of at most `max_window_days`
    ///   calendar days and each window becomes one connector call, oldest
    ///   window first.
    /// - Each window is merged into the accumulating series as soon as it
    ///   arrives; on a timestamp collision the later window wins.
    /// - The result is ascending even when `req.sort` is descending; the sort
    ///   option only controls what is asked of the service.
    ///
    /// # Errors
    /// Returns `InvalidRange` for an inverted range and `Unsupported` when the
    /// connector serves no bars. A failing window aborts the fetch and the
    /// windows fetched before it are discarded.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tickweave::router::bars::fetch_bars",
            skip(self, req),
            fields(
                symbol = %req.symbol,
                timespan = %req.timespan,
                from = %req.from,
                to = %req.to,
            ),
            err,
        )
    )]
    pub async fn fetch_bars(&self, req: BarsRequest) -> Result<BarSeries, TickweaveError> {
        let splitter = WindowSplitter::new(req.from, req.to, self.cfg.max_window_days)?;
        let provider = self.bars_provider()?;

        let mut acc = BarSeries::new(req.symbol.clone(), req.adjusted);
        for window in &splitter {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = %window.from, to = %window.to, "fetching bars window");
            let part = provider.bars(req.with_window(window.from, window.to)).await?;
            acc.merge(part)?;
        }

        #[cfg(feature = "tracing")]
        tracing::info!(bars = acc.len(), "bars range assembled");
        Ok(acc)
    }
}
