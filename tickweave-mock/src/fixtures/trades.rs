use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tickweave_core::{TradeRecord, TradesRequest};

/// Largest page the mock serves, mirroring the live service.
pub const PAGE_CEILING: u32 = 50_000;

/// Spacing between synthetic trades (1 ms).
pub const SPACING_NS: i64 = 1_000_000;

const OPEN_OFFSET_SECS: i64 = 13 * 3600 + 30 * 60;

/// Timestamp of the first synthetic trade of `day` (13:30 UTC).
pub fn session_open_ns(day: NaiveDate) -> i64 {
    (day.and_time(NaiveTime::MIN).and_utc().timestamp() + OPEN_OFFSET_SECS) * 1_000_000_000
}

/// Synthetic trade number `i` of `day`.
pub fn trade_at(day: NaiveDate, i: u64) -> TradeRecord {
    let step = i64::try_from(i).unwrap_or(i64::MAX / SPACING_NS);
    let mut t = TradeRecord::new(
        session_open_ns(day) + step * SPACING_NS,
        Decimal::new(10_000 + (step % 200), 2),
        100 + (i % 7) * 100,
    );
    t.sequence_no = Some(i + 1);
    t.exchange_id = Some(u32::try_from(i % 12).unwrap_or(0) + 1);
    t.conditions = if i % 5 == 0 { vec![12, 37] } else { Vec::new() };
    t
}

/// Serve one page of a day holding `per_day` trades, honoring the cursor
/// bounds, the reverse flag, and the page ceiling.
pub fn page(req: &TradesRequest, per_day: u64) -> Vec<TradeRecord> {
    if per_day == 0 {
        return Vec::new();
    }
    let open = session_open_ns(req.date);
    let last_index = i64::try_from(per_day - 1).unwrap_or(i64::MAX);
    let lo = req
        .timestamp_min
        .map_or(0, |min| (min - open + SPACING_NS - 1).div_euclid(SPACING_NS).max(0));
    let hi = req
        .timestamp_max
        .map_or(last_index, |max| (max - open).div_euclid(SPACING_NS).min(last_index));
    if lo > hi {
        return Vec::new();
    }
    let take = i64::from(req.limit.min(PAGE_CEILING));
    let (start, end) = if req.reverse {
        ((hi - take + 1).max(lo), hi)
    } else {
        (lo, (lo + take - 1).min(hi))
    };
    let mut out: Vec<TradeRecord> = (start..=end)
        .filter_map(|i| u64::try_from(i).ok())
        .map(|i| trade_at(req.date, i))
        .collect();
    if req.reverse {
        out.reverse();
    }
    out
}
