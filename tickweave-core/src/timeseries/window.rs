use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::TickweaveError;

/// Inclusive calendar-day window handed to one aggregates call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
}

impl DateWindow {
    /// Number of calendar days covered.
    #[must_use]
    pub fn days(&self) -> u64 {
        u64::try_from((self.to - self.from).num_days() + 1).unwrap_or(0)
    }
}

fn span_of(span_days: u32) -> Result<Days, TickweaveError> {
    if span_days == 0 {
        return Err(TickweaveError::InvalidArg("window span must be at least one day".into()));
    }
    Ok(Days::new(u64::from(span_days - 1)))
}

/// Splits an inclusive date range into consecutive windows of at most
/// `span_days` calendar days, oldest first.
///
/// The splitter is a plain value; every call to [`WindowSplitter::iter`]
/// starts over from `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSplitter {
    from: NaiveDate,
    to: NaiveDate,
    extra: Days,
}

impl WindowSplitter {
    /// Build a splitter for `[from, to]`.
    ///
    /// # Errors
    /// Returns `InvalidRange` if `from > to` and `InvalidArg` for a zero span.
    pub fn new(from: NaiveDate, to: NaiveDate, span_days: u32) -> Result<Self, TickweaveError> {
        TickweaveError::check_range(from, to)?;
        Ok(Self {
            from,
            to,
            extra: span_of(span_days)?,
        })
    }

    /// Iterate the windows.
    #[must_use]
    pub fn iter(&self) -> Windows {
        Windows {
            cursor: Some(self.from),
            to: self.to,
            extra: self.extra,
        }
    }
}

impl IntoIterator for &WindowSplitter {
    type Item = DateWindow;
    type IntoIter = Windows;

    fn into_iter(self) -> Windows {
        self.iter()
    }
}

/// Forward window iterator produced by [`WindowSplitter::iter`].
#[derive(Debug, Clone)]
pub struct Windows {
    cursor: Option<NaiveDate>,
    to: NaiveDate,
    extra: Days,
}

impl Iterator for Windows {
    type Item = DateWindow;

    fn next(&mut self) -> Option<DateWindow> {
        let from = self.cursor.filter(|c| *c <= self.to)?;
        let to = from
            .checked_add_days(self.extra)
            .map_or(self.to, |end| end.min(self.to));
        self.cursor = to.succ_opt();
        Some(DateWindow { from, to })
    }
}

/// Walks from `anchor` back to `floor` in windows of at most `span_days`
/// days, newest first. Windows never overlap and together cover
/// `[floor, anchor]`.
#[derive(Debug, Clone)]
pub struct BackwardWindows {
    cursor: Option<NaiveDate>,
    floor: NaiveDate,
    extra: Days,
}

impl BackwardWindows {
    /// Build the walk for `[floor, anchor]`.
    ///
    /// # Errors
    /// Returns `InvalidRange` if `floor > anchor` and `InvalidArg` for a zero span.
    pub fn new(anchor: NaiveDate, floor: NaiveDate, span_days: u32) -> Result<Self, TickweaveError> {
        TickweaveError::check_range(floor, anchor)?;
        Ok(Self {
            cursor: Some(anchor),
            floor,
            extra: span_of(span_days)?,
        })
    }
}

impl Iterator for BackwardWindows {
    type Item = DateWindow;

    fn next(&mut self) -> Option<DateWindow> {
        let to = self.cursor.filter(|c| *c >= self.floor)?;
        let from = to
            .checked_sub_days(self.extra)
            .map_or(self.floor, |start| start.max(self.floor));
        self.cursor = from.pred_opt();
        Some(DateWindow { from, to })
    }
}
