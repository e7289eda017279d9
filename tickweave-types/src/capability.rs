use core::fmt;
use serde::{Deserialize, Serialize};

/// Capability labels for errors, cache configuration, and telemetry.
///
/// Each label maps one-to-one to a role trait in `tickweave-core`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Aggregate bars over a date window.
    Bars,
    /// One cursor page of trade ticks for a symbol-day.
    Trades,
    /// Reference ticker listing.
    TickerList,
    /// Reference company detail for one ticker.
    TickerDetail,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bars => "bars",
            Self::Trades => "trades",
            Self::TickerList => "ticker-list",
            Self::TickerDetail => "ticker-detail",
        }
    }

    /// Whether responses for this capability are stable enough to memoise.
    ///
    /// Only reference data qualifies; bars and trades are always fetched fresh.
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::TickerList | Self::TickerDetail)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
