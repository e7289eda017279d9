use std::sync::Arc;

use tickweave_core::connector::{
    BarsProvider, TickerDetailProvider, TickerListProvider, TradesProvider,
};
use tickweave_core::{Capability, FetchConfig, TickweaveConnector, TickweaveError};

/// Orchestrator driving windowed and paginated fetches against one connector.
///
/// Cheap to clone; clones share the connector.
#[derive(Clone)]
pub struct Tickweave {
    pub(crate) connector: Arc<dyn TickweaveConnector>,
    pub(crate) cfg: FetchConfig,
}

impl std::fmt::Debug for Tickweave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tickweave")
            .field("connector", &self.connector.name())
            .field("cfg", &self.cfg)
            .finish()
    }
}

/// Builder for constructing a [`Tickweave`] orchestrator.
pub struct TickweaveBuilder {
    connector: Option<Arc<dyn TickweaveConnector>>,
    cfg: FetchConfig,
}

impl Default for TickweaveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TickweaveBuilder {
    /// Create a builder with the service defaults: 5-day windows, a 50,000
    /// trade page ceiling, one-unit ascending adjusted bars.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            cfg: FetchConfig::default(),
        }
    }

    /// Set the connector every fetch goes through. Registering again replaces it.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn TickweaveConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Replace the whole fetch configuration.
    #[must_use]
    pub fn fetch_config(mut self, cfg: FetchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Maximum calendar days per aggregates request.
    #[must_use]
    pub const fn max_window_days(mut self, days: u32) -> Self {
        self.cfg.max_window_days = days;
        self
    }

    /// Largest trades page the service serves.
    #[must_use]
    pub const fn trade_page_ceiling(mut self, ceiling: u32) -> Self {
        self.cfg.trade_page_ceiling = ceiling;
        self
    }

    /// Default bar width multiplier for [`Tickweave::fetch_range`].
    #[must_use]
    pub const fn multiplier(mut self, multiplier: u32) -> Self {
        self.cfg.multiplier = multiplier;
        self
    }

    /// Default adjustment flag for [`Tickweave::fetch_range`].
    #[must_use]
    pub const fn adjusted(mut self, yes: bool) -> Self {
        self.cfg.adjusted = yes;
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no connector was registered or when a limit
    /// or the default multiplier is zero.
    pub fn build(self) -> Result<Tickweave, TickweaveError> {
        let Some(connector) = self.connector else {
            return Err(TickweaveError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            ));
        };
        if self.cfg.max_window_days == 0 {
            return Err(TickweaveError::InvalidArg("max_window_days must be positive".into()));
        }
        if self.cfg.trade_page_ceiling == 0 {
            return Err(TickweaveError::InvalidArg(
                "trade_page_ceiling must be positive".into(),
            ));
        }
        if self.cfg.multiplier == 0 {
            return Err(TickweaveError::InvalidArg("multiplier must be positive".into()));
        }
        Ok(Tickweave {
            connector,
            cfg: self.cfg,
        })
    }
}

impl Tickweave {
    /// Start building a new orchestrator.
    #[must_use]
    pub fn builder() -> TickweaveBuilder {
        TickweaveBuilder::new()
    }

    /// Orchestrator with default limits around `connector`.
    #[must_use]
    pub fn new(connector: Arc<dyn TickweaveConnector>) -> Self {
        Self {
            connector,
            cfg: FetchConfig::default(),
        }
    }

    /// Active fetch configuration.
    #[must_use]
    pub const fn config(&self) -> &FetchConfig {
        &self.cfg
    }

    /// The injected connector.
    #[must_use]
    pub fn connector(&self) -> &Arc<dyn TickweaveConnector> {
        &self.connector
    }

    pub(crate) fn bars_provider(&self) -> Result<&dyn BarsProvider, TickweaveError> {
        self.connector
            .as_bars_provider()
            .ok_or_else(|| TickweaveError::unsupported(Capability::Bars.as_str()))
    }

    pub(crate) fn trades_provider(&self) -> Result<&dyn TradesProvider, TickweaveError> {
        self.connector
            .as_trades_provider()
            .ok_or_else(|| TickweaveError::unsupported(Capability::Trades.as_str()))
    }

    pub(crate) fn ticker_list_provider(&self) -> Result<&dyn TickerListProvider, TickweaveError> {
        self.connector
            .as_ticker_list_provider()
            .ok_or_else(|| TickweaveError::unsupported(Capability::TickerList.as_str()))
    }

    pub(crate) fn ticker_detail_provider(
        &self,
    ) -> Result<&dyn TickerDetailProvider, TickweaveError> {
        self.connector
            .as_ticker_detail_provider()
            .ok_or_else(|| TickweaveError::unsupported(Capability::TickerDetail.as_str()))
    }
}
