//! Keeping a lookback window of bars up to date across repeated calls.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use tickweave_core::{
    BackwardWindows, BarSeries, BarsRequest, SortOrder, Timespan, TickweaveError, market_date,
    market_day_start,
};

use crate::Tickweave;

/// Source of "today" for anchoring refreshes.
pub trait Clock: Send + Sync {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock reporting the date in the exchange timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketClock;

impl Clock for MarketClock {
    fn today(&self) -> NaiveDate {
        market_date(Utc::now())
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDate + Send + Sync,
{
    fn today(&self) -> NaiveDate {
        self()
    }
}

/// How far back from the anchor a refresh reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    /// A fixed number of calendar days before the anchor. `Days(0)` covers
    /// the anchor day only.
    Days(u32),
    /// An explicit first day.
    Since(NaiveDate),
}

impl Lookback {
    /// First day covered when anchored at `anchor`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the day count reaches before the calendar.
    pub fn floor(self, anchor: NaiveDate) -> Result<NaiveDate, TickweaveError> {
        match self {
            Self::Days(n) => anchor.checked_sub_days(Days::new(u64::from(n))).ok_or_else(|| {
                TickweaveError::InvalidArg(format!("lookback of {n} days from {anchor} is out of range"))
            }),
            Self::Since(floor) => Ok(floor),
        }
    }
}

/// Strategy used by [`IncrementalWindowFetcher::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshMode {
    /// Refetch the whole lookback window every time.
    #[default]
    Full,
    /// Once a series is held, fetch only `[previous anchor, anchor]`, merge
    /// it in, and drop bars that start before the floor's market day.
    Tail,
}

/// Stateful fetcher owning one bar series per symbol and timespan.
///
/// Holds the anchor date of the last refresh and the series it produced.
pub struct IncrementalWindowFetcher {
    tw: Tickweave,
    template: BarsRequest,
    lookback: Lookback,
    mode: RefreshMode,
    clock: Arc<dyn Clock>,
    anchor: Option<NaiveDate>,
    last_anchor: Option<NaiveDate>,
    held: Option<BarSeries>,
}

impl std::fmt::Debug for IncrementalWindowFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalWindowFetcher")
            .field("symbol", &self.template.symbol)
            .field("timespan", &self.template.timespan)
            .field("lookback", &self.lookback)
            .field("mode", &self.mode)
            .field("anchor", &self.anchor)
            .field("held", &self.held.as_ref().map(BarSeries::len))
            .finish_non_exhaustive()
    }
}

impl IncrementalWindowFetcher {
    /// Fetcher for `symbol` bars, using the orchestrator's defaults for
    /// multiplier and adjustment.
    pub fn new(tw: Tickweave, symbol: impl Into<String>, timespan: Timespan, lookback: Lookback) -> Self {
        let template = BarsRequest {
            symbol: symbol.into(),
            timespan,
            multiplier: tw.cfg.multiplier,
            from: NaiveDate::MIN,
            to: NaiveDate::MIN,
            sort: SortOrder::Asc,
            adjusted: tw.cfg.adjusted,
        };
        Self {
            tw,
            template,
            lookback,
            mode: RefreshMode::default(),
            clock: Arc::new(MarketClock),
            anchor: None,
            last_anchor: None,
            held: None,
        }
    }

    /// Select the refresh strategy.
    #[must_use]
    pub const fn with_mode(mut self, mode: RefreshMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the clock used to pick the anchor.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Pin the anchor instead of reading it from the clock on first refresh.
    #[must_use]
    pub const fn with_anchor(mut self, anchor: NaiveDate) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Bar width multiplier.
    #[must_use]
    pub const fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.template.multiplier = multiplier;
        self
    }

    /// Request split-adjusted bars or not.
    #[must_use]
    pub const fn with_adjusted(mut self, adjusted: bool) -> Self {
        self.template.adjusted = adjusted;
        self
    }

    /// Anchor date, once set.
    #[must_use]
    pub const fn anchor(&self) -> Option<NaiveDate> {
        self.anchor
    }

    /// Configured lookback.
    #[must_use]
    pub const fn lookback(&self) -> Lookback {
        self.lookback
    }

    /// Configured refresh strategy.
    #[must_use]
    pub const fn mode(&self) -> RefreshMode {
        self.mode
    }

    /// Series produced by the last successful refresh.
    #[must_use]
    pub const fn held(&self) -> Option<&BarSeries> {
        self.held.as_ref()
    }

    /// Bring the held series up to date and return a copy of it.
    ///
    /// When `reset_anchor` is set, or no anchor exists yet, the anchor moves
    /// to the clock's current date. The window `[floor, anchor]` is then
    /// refreshed according to the mode. A failed refresh leaves the held
    /// series and the anchor of the previous success untouched.
    ///
    /// # Errors
    /// Returns `InvalidRange` when the floor lies after the anchor; connector
    /// errors propagate unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tickweave::incremental::refresh",
            skip(self),
            fields(symbol = %self.template.symbol, mode = ?self.mode),
            err,
        )
    )]
    pub async fn refresh(&mut self, reset_anchor: bool) -> Result<BarSeries, TickweaveError> {
        let anchor = match self.anchor {
            Some(a) if !reset_anchor => a,
            _ => self.clock.today(),
        };
        let floor = self.lookback.floor(anchor)?;
        TickweaveError::check_range(floor, anchor)?;

        let series = match (self.mode, self.held.as_ref(), self.last_anchor) {
            (RefreshMode::Tail, Some(held), Some(prev)) if prev <= anchor => {
                self.refresh_tail(held.clone(), prev.max(floor), anchor, floor)
                    .await?
            }
            _ => self.refresh_full(anchor, floor).await?,
        };

        #[cfg(feature = "tracing")]
        tracing::info!(%anchor, %floor, bars = series.len(), "incremental refresh done");
        self.anchor = Some(anchor);
        self.last_anchor = Some(anchor);
        self.held = Some(series.clone());
        Ok(series)
    }

    async fn refresh_full(
        &self,
        anchor: NaiveDate,
        floor: NaiveDate,
    ) -> Result<BarSeries, TickweaveError> {
        let windows = BackwardWindows::new(anchor, floor, self.tw.cfg.max_window_days)?;
        let provider = self.tw.bars_provider()?;
        let mut acc = BarSeries::new(self.template.symbol.clone(), self.template.adjusted);
        for window in windows {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = %window.from, to = %window.to, "fetching lookback window");
            let part = provider
                .bars(self.template.with_window(window.from, window.to))
                .await?;
            acc.merge(part)?;
        }
        Ok(acc)
    }

    async fn refresh_tail(
        &self,
        mut held: BarSeries,
        from: NaiveDate,
        anchor: NaiveDate,
        floor: NaiveDate,
    ) -> Result<BarSeries, TickweaveError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(%from, to = %anchor, "fetching tail");
        let tail = self
            .tw
            .fetch_bars(self.template.with_window(from, anchor))
            .await?;
        held.merge(tail)?;
        held.retain_since(market_day_start(floor));
        Ok(held)
    }
}

impl Tickweave {
    /// Incremental fetcher for `symbol` bars sharing this orchestrator's
    /// connector and limits.
    #[must_use]
    pub fn incremental(
        &self,
        symbol: impl Into<String>,
        timespan: Timespan,
        lookback: Lookback,
    ) -> IncrementalWindowFetcher {
        IncrementalWindowFetcher::new(self.clone(), symbol, timespan, lookback)
    }
}
