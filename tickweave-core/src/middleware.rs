//! Middleware trait for wrapping `TickweaveConnector` implementations.

use std::sync::Arc;

use crate::connector::TickweaveConnector;

/// Trait implemented by connector middleware layers.
///
/// A middleware consumes an inner connector and returns a wrapped connector
/// that augments its behavior (e.g., memoising reference lookups).
pub trait Middleware: Send + Sync {
    /// Wrap `inner` and return the wrapped connector.
    fn apply(self: Box<Self>, inner: Arc<dyn TickweaveConnector>) -> Arc<dyn TickweaveConnector>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
