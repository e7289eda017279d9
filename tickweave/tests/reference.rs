mod helpers;

use std::sync::Arc;

use helpers::{AAPL, MSFT};
use tickweave::{
    CacheConfig, ConnectorBuilder, Tickweave, TickerListQuery, TickweaveConnector, TickweaveError,
};
use tickweave_mock::{MockCall, MockConnector};

fn cached_tw() -> (Arc<MockConnector>, Tickweave) {
    let mock = Arc::new(MockConnector::new());
    let raw: Arc<dyn TickweaveConnector> = mock.clone();
    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(&CacheConfig::default())
        .build()
        .unwrap();
    (mock, Tickweave::new(wrapped))
}

#[tokio::test]
async fn ticker_list_filters_by_search() {
    let (_mock, tw) = cached_tw();
    let list = tw
        .ticker_list(&TickerListQuery::search("stocks", "micro"))
        .await
        .unwrap();
    assert_eq!(list.tickers.len(), 1);
    assert_eq!(list.tickers[0].symbol, MSFT);
}

#[tokio::test]
async fn repeated_detail_lookups_hit_the_cache() {
    let (mock, tw) = cached_tw();
    let a = tw.ticker_detail(AAPL).await.unwrap();
    let b = tw.ticker_detail(AAPL).await.unwrap();
    assert_eq!(a, b);
    let detail_calls = mock
        .calls()
        .await
        .into_iter()
        .filter(|c| matches!(c, MockCall::TickerDetail(_)))
        .count();
    assert_eq!(detail_calls, 1);
}

#[tokio::test]
async fn unknown_symbol_is_not_found_and_not_cached() {
    let (mock, tw) = cached_tw();
    for _ in 0..2 {
        let err = tw.ticker_detail("ZZZZ").await.unwrap_err();
        assert!(matches!(err, TickweaveError::NotFound { .. }));
    }
    assert_eq!(mock.calls().await.len(), 2);
}

#[tokio::test]
async fn empty_symbol_is_rejected() {
    let (mock, tw) = cached_tw();
    let err = tw.ticker_detail("  ").await.unwrap_err();
    assert!(matches!(err, TickweaveError::InvalidArg(_)));
    assert!(mock.calls().await.is_empty());
}

struct Bare;

impl TickweaveConnector for Bare {
    fn name(&self) -> &'static str {
        "bare"
    }
}

#[tokio::test]
async fn missing_capability_is_unsupported() {
    let tw = Tickweave::new(Arc::new(Bare));
    let err = tw.ticker_detail(AAPL).await.unwrap_err();
    assert_eq!(err, TickweaveError::unsupported("ticker-detail"));
    let err = tw
        .fetch_range(AAPL, tickweave::Timespan::Day, helpers::d0(), helpers::d(1))
        .await
        .unwrap_err();
    assert_eq!(err, TickweaveError::unsupported("bars"));
}

#[test]
fn builder_requires_a_connector_and_positive_limits() {
    assert!(matches!(
        Tickweave::builder().build(),
        Err(TickweaveError::InvalidArg(_))
    ));
    let raw: Arc<dyn TickweaveConnector> = Arc::new(Bare);
    assert!(Tickweave::builder().with_connector(raw.clone()).max_window_days(0).build().is_err());
    assert!(Tickweave::builder().with_connector(raw.clone()).trade_page_ceiling(0).build().is_err());
    let tw = Tickweave::builder().with_connector(raw).build().unwrap();
    assert_eq!(tw.config().max_window_days, 5);
    assert_eq!(tw.config().trade_page_ceiling, 50_000);
}
