#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

mod builder;
mod cache;

pub use crate::builder::ConnectorBuilder;
pub use crate::cache::{CacheMiddleware, CachingConnector};
