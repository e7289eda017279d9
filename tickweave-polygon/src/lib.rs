//! tickweave-polygon
//!
//! `TickweaveConnector` backed by the Polygon.io REST API. Serves aggregate
//! bars, trade pages, ticker listings, and company details. Each trait call
//! issues exactly one HTTP request; windowing and pagination live in the
//! orchestrator.
#![warn(missing_docs)]

mod builder;
mod config;
mod wire;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tickweave_core::connector::{
    BarsProvider, TickerDetailProvider, TickerListProvider, TickweaveConnector, TradesProvider,
};
use tickweave_core::{
    BarSeries, BarsRequest, TickerDetail, TickerList, TickerListQuery, TickweaveError, TradeSeries,
    TradesRequest,
};
use url::Url;

pub use builder::PolygonConnectorBuilder;
pub use config::{API_KEY_ENV, DEFAULT_BASE_URL, PolygonConfig};

/// REST connector for Polygon.io.
#[derive(Clone)]
pub struct PolygonConnector {
    http: Client,
    base: Url,
    api_key: String,
}

impl std::fmt::Debug for PolygonConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolygonConnector")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl PolygonConnector {
    /// Build an unwrapped connector from `cfg`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unparsable base URL and `Transport` when the
    /// HTTP client cannot be constructed.
    pub fn new_raw(cfg: &PolygonConfig) -> Result<Self, TickweaveError> {
        let base = Url::parse(&cfg.base_url)
            .map_err(|e| TickweaveError::InvalidArg(format!("base url '{}': {e}", cfg.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(TickweaveError::InvalidArg(format!(
                "base url '{}' cannot carry a path",
                cfg.base_url
            )));
        }
        let mut http = Client::builder();
        if let Some(t) = cfg.timeout {
            http = http.timeout(t);
        }
        let http = http
            .build()
            .map_err(|e| TickweaveError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base,
            api_key: cfg.api_key.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, TickweaveError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| TickweaveError::InvalidArg("base url cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tickweave_polygon::get", skip(self, url, query), fields(path = %url.path()), err)
    )]
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, TickweaveError> {
        let resp = self
            .http
            .get(url)
            .query(query)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| TickweaveError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        #[cfg(feature = "tracing")]
        tracing::debug!(status = status.as_u16(), "polygon response");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("").to_string()
            } else {
                body
            };
            return Err(TickweaveError::remote(status.as_u16(), message));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| TickweaveError::Transport(e.without_url().to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| TickweaveError::Data(e.to_string()))
    }
}

impl TickweaveConnector for PolygonConnector {
    fn name(&self) -> &'static str {
        "tickweave-polygon"
    }

    fn vendor(&self) -> &'static str {
        "Polygon.io"
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
impl BarsProvider for PolygonConnector {
    async fn bars(&self, req: BarsRequest) -> Result<BarSeries, TickweaveError> {
        TickweaveError::check_range(req.from, req.to)?;
        let multiplier = req.multiplier.to_string();
        let from = req.from.to_string();
        let to = req.to.to_string();
        let url = self.endpoint(&[
            "v2",
            "aggs",
            "ticker",
            &req.symbol,
            "range",
            &multiplier,
            req.timespan.as_str(),
            &from,
            &to,
        ])?;
        let query = [
            ("sort", req.sort.as_str().to_string()),
            ("unadjusted", (!req.adjusted).to_string()),
        ];
        let resp: wire::AggsResponse = self.get_json(url, &query).await?;
        let bars = resp
            .results
            .unwrap_or_default()
            .into_iter()
            .map(wire::WireBar::into_bar)
            .collect::<Result<Vec<_>, _>>()?;
        let adjusted = resp.adjusted.unwrap_or(req.adjusted);
        Ok(BarSeries::from_bars(req.symbol, adjusted, bars))
    }
}

#[async_trait]
impl TradesProvider for PolygonConnector {
    async fn trades(
        &self,
        req: TradesRequest,
    ) -> Result<(TradeSeries, Option<i64>), TickweaveError> {
        let date = req.date.to_string();
        let url = self.endpoint(&["v2", "ticks", "stocks", "trades", &req.symbol, &date])?;
        let mut query = vec![
            ("limit", req.limit.to_string()),
            ("reverse", req.reverse.to_string()),
        ];
        if let Some(min) = req.timestamp_min {
            query.push(("timestamp", min.to_string()));
        }
        if let Some(max) = req.timestamp_max {
            query.push(("timestampLimit", max.to_string()));
        }
        let resp: wire::TradesResponse = self.get_json(url, &query).await?;
        let trades = resp
            .results
            .unwrap_or_default()
            .into_iter()
            .map(wire::WireTrade::into_trade)
            .collect::<Result<Vec<_>, _>>()?;
        let last = trades.last().map(|t| t.ts);
        let count = resp.results_count.unwrap_or(trades.len() as u64);
        let series = TradeSeries::from_trades(req.symbol, req.date, trades).with_result_count(count);
        Ok((series, last))
    }
}

#[async_trait]
impl TickerListProvider for PolygonConnector {
    async fn ticker_list(&self, query: &TickerListQuery) -> Result<TickerList, TickweaveError> {
        let url = self.endpoint(&["v2", "reference", "tickers"])?;
        let mut params = Vec::new();
        if let Some(m) = &query.market {
            params.push(("market", m.clone()));
        }
        if let Some(s) = &query.search {
            params.push(("search", s.clone()));
        }
        if let Some(a) = query.active {
            params.push(("active", a.to_string()));
        }
        let resp: wire::TickersResponse = self.get_json(url, &params).await?;
        Ok(resp.into())
    }
}

#[async_trait]
impl TickerDetailProvider for PolygonConnector {
    async fn ticker_detail(&self, symbol: &str) -> Result<TickerDetail, TickweaveError> {
        let url = self.endpoint(&["v1", "meta", "symbols", symbol, "company"])?;
        match self.get_json::<wire::WireTickerDetail>(url, &[]).await {
            Ok(detail) => Ok(detail.into()),
            Err(TickweaveError::RemoteService {
                status_code: 404, ..
            }) => Err(TickweaveError::not_found(format!("ticker detail for {symbol}"))),
            Err(e) => Err(e),
        }
    }
}
