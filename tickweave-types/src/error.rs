use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tickweave workspace.
///
/// Covers request validation, series-ordering violations raised while merging
/// fetched pages, and failures reported by the remote market-data service.
/// Nothing in the workspace retries on error; every variant propagates to the
/// caller and aborts the fetch that produced it.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TickweaveError {
    /// The requested date range starts after it ends.
    #[error("invalid range: {from} is after {to}")]
    InvalidRange {
        /// First day of the requested range.
        from: NaiveDate,
        /// Last day of the requested range.
        to: NaiveDate,
    },

    /// A bar was inserted with a timestamp older than the series tail.
    #[error("unsupported insertion order: bar at {attempted} is older than tail {last}")]
    UnsupportedInsertionOrder {
        /// Window start of the current last bar.
        last: DateTime<Utc>,
        /// Window start of the rejected bar.
        attempted: DateTime<Utc>,
    },

    /// A trade page did not start with the boundary record of the previous page.
    #[error("continuation mismatch: expected first trade at {expected:?}, found {found:?}")]
    ContinuationMismatch {
        /// Timestamp (ns) of the last trade already held, if any.
        expected: Option<i64>,
        /// Timestamp (ns) of the first trade of the continuation page, if any.
        found: Option<i64>,
    },

    /// The remote service answered with a non-success status.
    #[error("remote service error: status {status_code}: {message}")]
    RemoteService {
        /// HTTP status code returned by the service.
        status_code: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The request never produced a response (connect, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// Issues with the returned or expected data (missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label describing what was requested (e.g. "bars").
        capability: String,
    },

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "ticker detail for AAPL".
        what: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl TickweaveError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `RemoteService` error from a status code and message.
    pub fn remote(status_code: u16, message: impl Into<String>) -> Self {
        Self::RemoteService {
            status_code,
            message: message.into(),
        }
    }

    /// Helper: build an `InvalidRange` error, or `Ok(())` when `from <= to`.
    ///
    /// # Errors
    /// Returns `InvalidRange` when `from` is after `to`.
    pub fn check_range(from: NaiveDate, to: NaiveDate) -> Result<(), Self> {
        if from > to {
            Err(Self::InvalidRange { from, to })
        } else {
            Ok(())
        }
    }

    /// HTTP status code carried by a `RemoteService` error.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::RemoteService { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Capability absence and benign not-found conditions are not actionable.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self, Self::Unsupported { .. } | Self::NotFound { .. })
    }
}
