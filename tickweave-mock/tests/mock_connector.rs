use chrono::NaiveDate;
use tickweave_core::connector::TickweaveConnector;
use tickweave_core::{BarsRequest, SortOrder, TickweaveError, TradesRequest};
use tickweave_mock::{MockCall, MockConnector, SPACING_NS, session_open_ns};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[tokio::test]
async fn bars_cover_each_day_in_window() {
    let mock = MockConnector::new();
    let req = BarsRequest::new("AAPL", day(1), day(5)).unwrap();
    let series = mock.as_bars_provider().unwrap().bars(req).await.unwrap();
    assert_eq!(series.len(), 5);
    assert_eq!(series.first().unwrap().ts.date_naive(), day(1));
    assert_eq!(series.last().unwrap().ts.date_naive(), day(5));
}

#[tokio::test]
async fn descending_bars_are_normalized_by_series() {
    let mock = MockConnector::new();
    let mut req = BarsRequest::new("AAPL", day(1), day(3)).unwrap();
    req.sort = SortOrder::Desc;
    let series = mock.as_bars_provider().unwrap().bars(req).await.unwrap();
    assert!(series.bars().windows(2).all(|p| p[0].ts < p[1].ts));
}

#[tokio::test]
async fn fail_symbol_returns_remote_error() {
    let mock = MockConnector::new();
    let req = BarsRequest::new("FAIL", day(1), day(2)).unwrap();
    let err = mock.as_bars_provider().unwrap().bars(req).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn trade_pages_overlap_on_cursor() {
    let mock = MockConnector::new().with_trades_per_day(10);
    let p = mock.as_trades_provider().unwrap();

    let (first, cursor) = p.trades(TradesRequest::new("AAPL", day(4), 4)).await.unwrap();
    assert_eq!(first.len(), 4);
    let cursor = cursor.unwrap();
    assert_eq!(cursor, session_open_ns(day(4)) + 3 * SPACING_NS);

    let mut next = TradesRequest::new("AAPL", day(4), 4);
    next.timestamp_min = Some(cursor);
    let (second, _) = p.trades(next).await.unwrap();
    assert_eq!(second.trades()[0].ts, cursor);

    let mut tail = TradesRequest::new("AAPL", day(4), 100);
    tail.timestamp_min = Some(session_open_ns(day(4)) + 9 * SPACING_NS + 1);
    let (empty, none) = p.trades(tail).await.unwrap();
    assert!(empty.is_empty());
    assert!(none.is_none());
}

#[tokio::test]
async fn reverse_pages_start_from_newest() {
    let mock = MockConnector::new().with_trades_per_day(10);
    let mut req = TradesRequest::new("AAPL", day(4), 3);
    req.reverse = true;
    let (page, _) = mock.as_trades_provider().unwrap().trades(req).await.unwrap();
    let idx: Vec<i64> = page
        .trades()
        .iter()
        .map(|t| (t.ts - session_open_ns(day(4))) / SPACING_NS)
        .collect();
    assert_eq!(idx, vec![9, 8, 7]);
}

#[tokio::test]
async fn unknown_detail_is_not_found_and_calls_are_recorded() {
    let mock = MockConnector::new();
    let p = mock.as_ticker_detail_provider().unwrap();
    assert!(p.ticker_detail("aapl").await.is_ok());
    let err = p.ticker_detail("ZZZZ").await.unwrap_err();
    assert!(matches!(err, TickweaveError::NotFound { .. }));
    assert_eq!(
        mock.calls().await,
        vec![
            MockCall::TickerDetail("aapl".into()),
            MockCall::TickerDetail("ZZZZ".into())
        ]
    );
}
