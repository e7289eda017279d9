mod helpers;

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use helpers::{AAPL, EveningBars, d, d0, evening_ts, mock_tw, tw_for};
use tickweave::{
    Clock, DateWindow, Lookback, RefreshMode, Timespan, TickweaveError, market_day_start,
};
use tickweave_mock::{MockConnector, daily_bar};

fn settable_clock(start: NaiveDate) -> (Arc<Mutex<NaiveDate>>, Arc<dyn Clock>) {
    let today = Arc::new(Mutex::new(start));
    let handle = today.clone();
    let clock: Arc<dyn Clock> = Arc::new(move || *handle.lock().unwrap());
    (today, clock)
}

fn w(from: u64, to: u64) -> DateWindow {
    DateWindow { from: d(from), to: d(to) }
}

#[tokio::test]
async fn full_refresh_walks_backward_from_anchor() {
    let (mock, tw) = mock_tw(MockConnector::new());
    let (_today, clock) = settable_clock(d(11));
    let mut inc = tw
        .incremental(AAPL, Timespan::Day, Lookback::Days(11))
        .with_clock(clock);
    assert!(inc.held().is_none());

    let series = inc.refresh(false).await.unwrap();
    assert_eq!(mock.bar_windows().await, vec![w(7, 11), w(2, 6), w(0, 1)]);
    assert_eq!(series.len(), 12);
    assert_eq!(series.first(), Some(&daily_bar(AAPL, d0())));
    assert_eq!(series.last(), Some(&daily_bar(AAPL, d(11))));
    assert!(series.bars().windows(2).all(|p| p[0].ts < p[1].ts));
    assert_eq!(inc.anchor(), Some(d(11)));
    assert_eq!(inc.held(), Some(&series));
}

#[tokio::test]
async fn full_mode_recomputes_after_anchor_reset() {
    let (mock, tw) = mock_tw(MockConnector::new());
    let (today, clock) = settable_clock(d(11));
    let mut inc = tw
        .incremental(AAPL, Timespan::Day, Lookback::Days(11))
        .with_clock(clock);
    inc.refresh(false).await.unwrap();

    *today.lock().unwrap() = d(13);
    mock.reset_calls().await;

    // Without a reset the anchor stays put.
    let same = inc.refresh(false).await.unwrap();
    assert_eq!(same.last(), Some(&daily_bar(AAPL, d(11))));
    mock.reset_calls().await;

    let moved = inc.refresh(true).await.unwrap();
    assert_eq!(mock.bar_windows().await, vec![w(9, 13), w(4, 8), w(2, 3)]);
    assert_eq!(moved.len(), 12);
    assert_eq!(moved.first(), Some(&daily_bar(AAPL, d(2))));
    assert_eq!(moved.last(), Some(&daily_bar(AAPL, d(13))));
}

#[tokio::test]
async fn tail_mode_fetches_only_the_new_segment() {
    let (mock, tw) = mock_tw(MockConnector::new());
    let (today, clock) = settable_clock(d(11));
    let mut inc = tw
        .incremental(AAPL, Timespan::Day, Lookback::Days(11))
        .with_mode(RefreshMode::Tail)
        .with_clock(clock);

    // Nothing held yet: the first refresh covers the whole lookback.
    inc.refresh(false).await.unwrap();
    assert_eq!(mock.bar_windows().await.len(), 3);

    *today.lock().unwrap() = d(13);
    mock.reset_calls().await;
    let series = inc.refresh(true).await.unwrap();

    assert_eq!(mock.bar_windows().await, vec![w(11, 13)]);
    assert_eq!(series.len(), 12);
    assert_eq!(series.first(), Some(&daily_bar(AAPL, d(2))));
    assert_eq!(series.last(), Some(&daily_bar(AAPL, d(13))));
    assert!(series.bars().windows(2).all(|p| p[0].ts < p[1].ts));
}

#[tokio::test]
async fn tail_and_full_agree_on_the_result() {
    let (_m1, tw_full) = mock_tw(MockConnector::new());
    let (_m2, tw_tail) = mock_tw(MockConnector::new());
    let (t1, c1) = settable_clock(d(6));
    let (t2, c2) = settable_clock(d(6));
    let mut full = tw_full
        .incremental(AAPL, Timespan::Day, Lookback::Days(6))
        .with_clock(c1);
    let mut tail = tw_tail
        .incremental(AAPL, Timespan::Day, Lookback::Days(6))
        .with_mode(RefreshMode::Tail)
        .with_clock(c2);

    for day in 6..15 {
        *t1.lock().unwrap() = d(day);
        *t2.lock().unwrap() = d(day);
        let a = full.refresh(true).await.unwrap();
        let b = tail.refresh(true).await.unwrap();
        assert_eq!(a, b, "diverged at day {day}");
    }
}

#[tokio::test]
async fn zero_lookback_fetches_anchor_day_only() {
    let (mock, tw) = mock_tw(MockConnector::new());
    let mut inc = tw
        .incremental(AAPL, Timespan::Day, Lookback::Days(0))
        .with_anchor(d(3));
    let series = inc.refresh(false).await.unwrap();
    assert_eq!(mock.bar_windows().await, vec![w(3, 3)]);
    assert_eq!(series.len(), 1);
}

#[tokio::test]
async fn explicit_floor_is_used_and_validated() {
    let (mock, tw) = mock_tw(MockConnector::new());
    let mut inc = tw
        .incremental(AAPL, Timespan::Day, Lookback::Since(d(4)))
        .with_anchor(d(6));
    let series = inc.refresh(false).await.unwrap();
    assert_eq!(mock.bar_windows().await, vec![w(4, 6)]);
    assert_eq!(series.len(), 3);

    let mut bad = tw
        .incremental(AAPL, Timespan::Day, Lookback::Since(d(9)))
        .with_anchor(d(6));
    let err = bad.refresh(false).await.unwrap_err();
    assert_eq!(err, TickweaveError::InvalidRange { from: d(9), to: d(6) });
    assert!(bad.held().is_none());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_state() {
    let (_mock, tw) = mock_tw(MockConnector::new().fail_on(d(13)));
    let (today, clock) = settable_clock(d(11));
    let mut inc = tw
        .incremental(AAPL, Timespan::Day, Lookback::Days(4))
        .with_clock(clock);
    let first = inc.refresh(false).await.unwrap();

    *today.lock().unwrap() = d(13);
    let err = inc.refresh(true).await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(inc.held(), Some(&first));
    assert_eq!(inc.anchor(), Some(d(11)));
}

#[test]
fn market_day_starts_at_new_york_midnight() {
    let jan = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
    let jul = NaiveDate::from_ymd_opt(2024, 7, 12).unwrap();
    assert_eq!(market_day_start(jan), jan.and_hms_opt(5, 0, 0).unwrap().and_utc());
    assert_eq!(market_day_start(jul), jul.and_hms_opt(4, 0, 0).unwrap().and_utc());
}

#[tokio::test]
async fn tail_trims_at_market_midnight_for_intraday_bars() {
    let jan = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
    let tw_full = tw_for(Arc::new(EveningBars), None);
    let tw_tail = tw_for(Arc::new(EveningBars), None);
    let (t1, c1) = settable_clock(jan(14));
    let (t2, c2) = settable_clock(jan(14));
    let mut full = tw_full
        .incremental(AAPL, Timespan::Minute, Lookback::Days(4))
        .with_clock(c1);
    let mut tail = tw_tail
        .incremental(AAPL, Timespan::Minute, Lookback::Days(4))
        .with_mode(RefreshMode::Tail)
        .with_clock(c2);
    full.refresh(false).await.unwrap();
    tail.refresh(false).await.unwrap();

    *t1.lock().unwrap() = jan(16);
    *t2.lock().unwrap() = jan(16);
    let a = full.refresh(true).await.unwrap();
    let b = tail.refresh(true).await.unwrap();

    // Evening bars of Jan 11 land on Jan 12 in UTC but precede the floor day.
    assert_eq!(a.len(), 5);
    assert_eq!(a.first().map(|bar| bar.ts), Some(evening_ts(jan(12))));
    assert_eq!(a, b);
}
