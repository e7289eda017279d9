use chrono::NaiveDate;
use rust_decimal::Decimal;
use tickweave_core::{TickweaveError, TradeRecord, TradeSeries};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

fn trade(ts: i64) -> TradeRecord {
    TradeRecord::new(ts, Decimal::new(10_000 + ts, 2), 100)
}

fn page(ts: &[i64]) -> TradeSeries {
    TradeSeries::from_trades("AAPL", day(), ts.iter().copied().map(trade).collect())
}

fn stamps(s: &TradeSeries) -> Vec<i64> {
    s.trades().iter().map(|t| t.ts).collect()
}

#[test]
fn consume_drops_boundary_overlap() {
    let mut s = page(&[0, 1, 2]);
    s.consume(page(&[2, 3, 4])).unwrap();
    assert_eq!(stamps(&s), vec![0, 1, 2, 3, 4]);
    assert_eq!(s.result_count(), 5);
    assert_eq!(s.last_ts(), Some(4));
}

#[test]
fn consume_rejects_mismatched_boundary() {
    let mut s = page(&[0, 1, 2]);
    let err = s.consume(page(&[3, 4])).unwrap_err();
    assert_eq!(
        err,
        TickweaveError::ContinuationMismatch {
            expected: Some(2),
            found: Some(3)
        }
    );
    assert_eq!(stamps(&s), vec![0, 1, 2]);
    assert_eq!(s.result_count(), 3);
}

#[test]
fn consume_rejects_empty_sides() {
    let mut empty = TradeSeries::new("AAPL", day());
    assert!(matches!(
        empty.consume(page(&[1])),
        Err(TickweaveError::ContinuationMismatch { expected: None, .. })
    ));
    let mut s = page(&[1]);
    assert!(matches!(
        s.consume(TradeSeries::new("AAPL", day())),
        Err(TickweaveError::ContinuationMismatch { found: None, .. })
    ));
}

#[test]
fn consume_rejects_other_day() {
    let mut s = page(&[1]);
    let other = TradeSeries::from_trades("AAPL", day().succ_opt().unwrap(), vec![trade(1)]);
    assert!(matches!(s.consume(other), Err(TickweaveError::InvalidArg(_))));
}

#[test]
fn consume_tracks_reported_counts() {
    let mut s = page(&[0, 1]).with_result_count(2);
    s.consume(page(&[1, 2, 3]).with_result_count(3)).unwrap();
    s.consume(page(&[3, 4])).unwrap();
    assert_eq!(s.result_count(), 5);
    assert_eq!(s.len(), 5);
}

#[test]
fn duplicate_timestamps_are_kept_within_a_page() {
    let mut s = page(&[5, 5, 6]);
    s.consume(page(&[6, 6, 7])).unwrap();
    assert_eq!(stamps(&s), vec![5, 5, 6, 6, 7]);
}

#[test]
fn frame_invalidated_after_consume() {
    let mut s = page(&[0, 1]);
    assert_eq!(s.frame().len(), 2);
    assert!(s.is_frame_cached());
    s.consume(page(&[1, 2])).unwrap();
    assert!(!s.is_frame_cached());
    assert_eq!(s.frame().ts_ns, vec![0, 1, 2]);
}
