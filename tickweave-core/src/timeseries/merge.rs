use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::Bar;

/// Merge bar batches into one ascending, de-duplicated sequence.
///
/// - Bars are keyed by `ts`; the last appearance wins for duplicates, so later
///   batches override earlier ones.
/// - The output is sorted by timestamp regardless of input order.
pub fn merge_bars<I>(batches: I) -> Vec<Bar>
where
    I: IntoIterator<Item = Vec<Bar>>,
{
    let mut by_ts: BTreeMap<DateTime<Utc>, Bar> = BTreeMap::new();
    for batch in batches {
        for bar in batch {
            by_ts.insert(bar.ts, bar);
        }
    }
    by_ts.into_values().collect()
}
