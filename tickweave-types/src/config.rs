//! Configuration types shared across the orchestrator and connectors.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Capability, SortOrder};

/// Limits and defaults applied by the windowed fetch engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchConfig {
    /// Maximum number of calendar days covered by one aggregates request.
    pub max_window_days: u32,
    /// Largest page the trades endpoint serves in one response.
    pub trade_page_ceiling: u32,
    /// Default bar width multiplier (`1` with `Timespan::Minute` is one-minute bars).
    pub multiplier: u32,
    /// Default ordering requested from the aggregates endpoint.
    pub sort: SortOrder,
    /// Whether bars are split-adjusted by default.
    pub adjusted: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_window_days: 5,
            trade_page_ceiling: 50_000,
            multiplier: 1,
            sort: SortOrder::Asc,
            adjusted: true,
        }
    }
}

/// Bounded, time-limited memoisation settings for reference-data lookups.
///
/// A TTL of zero disables caching for that capability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied to capabilities without an override.
    pub default_ttl_ms: u64,
    /// Entry ceiling applied to capabilities without an override.
    pub default_max_entries: u64,
    /// Per-capability TTL overrides in milliseconds.
    pub per_capability_ttl_ms: HashMap<Capability, u64>,
    /// Per-capability entry ceilings.
    pub per_capability_max_entries: HashMap<Capability, u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: 15 * 60 * 1000,
            default_max_entries: 1024,
            per_capability_ttl_ms: HashMap::new(),
            per_capability_max_entries: HashMap::new(),
        }
    }
}

impl CacheConfig {
    /// Effective TTL for `cap`, or `None` when caching is disabled for it.
    ///
    /// Bars and trades are never cached.
    #[must_use]
    pub fn ttl_for(&self, cap: Capability) -> Option<Duration> {
        if !cap.is_reference() {
            return None;
        }
        let ms = self
            .per_capability_ttl_ms
            .get(&cap)
            .copied()
            .unwrap_or(self.default_ttl_ms);
        (ms > 0).then(|| Duration::from_millis(ms))
    }

    /// Effective entry ceiling for `cap` (at least one).
    #[must_use]
    pub fn capacity_for(&self, cap: Capability) -> u64 {
        self.per_capability_max_entries
            .get(&cap)
            .copied()
            .unwrap_or(self.default_max_entries)
            .max(1)
    }

    /// Override the TTL for one capability.
    #[must_use]
    pub fn with_ttl(mut self, cap: Capability, ttl: Duration) -> Self {
        let ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self.per_capability_ttl_ms.insert(cap, ms);
        self
    }

    /// Override the entry ceiling for one capability.
    #[must_use]
    pub fn with_max_entries(mut self, cap: Capability, max_entries: u64) -> Self {
        self.per_capability_max_entries.insert(cap, max_entries);
        self
    }
}
