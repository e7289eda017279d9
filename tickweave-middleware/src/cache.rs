use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use tickweave_core::connector::{
    BarsProvider, TickerDetailProvider, TickerListProvider, TradesProvider,
};
use tickweave_core::{
    BarSeries, BarsRequest, TickerDetail, TickerList, TickerListQuery, TickweaveConnector,
    TickweaveError, TradeSeries, TradesRequest,
};
use tickweave_types::{CacheConfig, Capability};

/// Declarative wrapper that applies caching when building a connector stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Create the middleware from a cache configuration.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl tickweave_core::Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn TickweaveConnector>) -> Arc<dyn TickweaveConnector> {
        let Self { cfg } = *self;
        Arc::new(CachingConnector::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "default_ttl_ms": self.cfg.default_ttl_ms,
            "default_max_entries": self.cfg.default_max_entries,
            "per_capability_ttl_ms": self.cfg.per_capability_ttl_ms,
            "per_capability_max_entries": self.cfg.per_capability_max_entries,
        })
    }
}

// Per-capability stores; `None` means disabled (TTL=0).
struct Stores {
    ticker_list: Option<Cache<TickerListQuery, Arc<TickerList>>>,
    ticker_detail: Option<Cache<String, Arc<TickerDetail>>>,
}

/// Connector wrapper memoising reference-data lookups.
///
/// Each cached capability gets its own store bounded by
/// [`CacheConfig::capacity_for`] entries and expiring after
/// [`CacheConfig::ttl_for`]. Errors are never cached. Bars and trades pass
/// through untouched.
pub struct CachingConnector {
    inner: Arc<dyn TickweaveConnector>,
    stores: Stores,
}

impl CachingConnector {
    fn maybe_store<K, V>(cfg: &CacheConfig, cap: Capability) -> Option<Cache<K, V>>
    where
        K: std::hash::Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let ttl = cfg.ttl_for(cap)?;
        Some(
            Cache::builder()
                .max_capacity(cfg.capacity_for(cap))
                .time_to_live(ttl)
                .build(),
        )
    }

    /// Wrap `inner` with stores configured from `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn TickweaveConnector>, cfg: &CacheConfig) -> Self {
        let stores = Stores {
            ticker_list: Self::maybe_store(cfg, Capability::TickerList),
            ticker_detail: Self::maybe_store(cfg, Capability::TickerDetail),
        };
        Self { inner, stores }
    }
}

impl TickweaveConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    tickweave_core::tickweave_connector_accessors!(inner);
}

#[async_trait]
impl BarsProvider for CachingConnector {
    async fn bars(&self, req: BarsRequest) -> Result<BarSeries, TickweaveError> {
        self.inner
            .as_bars_provider()
            .ok_or_else(|| TickweaveError::unsupported(Capability::Bars.as_str()))?
            .bars(req)
            .await
    }
}

#[async_trait]
impl TradesProvider for CachingConnector {
    async fn trades(
        &self,
        req: TradesRequest,
    ) -> Result<(TradeSeries, Option<i64>), TickweaveError> {
        self.inner
            .as_trades_provider()
            .ok_or_else(|| TickweaveError::unsupported(Capability::Trades.as_str()))?
            .trades(req)
            .await
    }
}

#[async_trait]
impl TickerListProvider for CachingConnector {
    async fn ticker_list(&self, query: &TickerListQuery) -> Result<TickerList, TickweaveError> {
        let inner = self
            .inner
            .as_ticker_list_provider()
            .ok_or_else(|| TickweaveError::unsupported(Capability::TickerList.as_str()))?;
        let Some(store) = &self.stores.ticker_list else {
            return inner.ticker_list(query).await;
        };
        if let Some(v) = store.get(query).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(capability = "ticker-list", ?query, "cache hit");
            return Ok((*v).clone());
        }
        let value = inner.ticker_list(query).await?;
        store.insert(query.clone(), Arc::new(value.clone())).await;
        Ok(value)
    }
}

#[async_trait]
impl TickerDetailProvider for CachingConnector {
    async fn ticker_detail(&self, symbol: &str) -> Result<TickerDetail, TickweaveError> {
        let inner = self
            .inner
            .as_ticker_detail_provider()
            .ok_or_else(|| TickweaveError::unsupported(Capability::TickerDetail.as_str()))?;
        let Some(store) = &self.stores.ticker_detail else {
            return inner.ticker_detail(symbol).await;
        };
        let key = symbol.to_ascii_uppercase();
        if let Some(v) = store.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(capability = "ticker-detail", symbol = %key, "cache hit");
            return Ok((*v).clone());
        }
        let value = inner.ticker_detail(symbol).await?;
        store.insert(key, Arc::new(value.clone())).await;
        Ok(value)
    }
}
