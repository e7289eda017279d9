//! Error, configuration, and request primitives shared by the tickweave crates.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
mod error;
mod request;

pub use capability::Capability;
pub use config::{CacheConfig, FetchConfig};
pub use connector::ConnectorKey;
pub use error::TickweaveError;
pub use request::{SortOrder, Timespan};
