//! Builder for composing connectors with middleware layers.
//!
//! Layers form an onion around the raw connector. The `layers` vector stores
//! middleware in **outermost-first** order (last added = outermost) and
//! `build()` applies them in reverse:
//!
//! ```text
//! builder.with_cache(..).with_middleware(Logging)
//!
//! Storage: [Logging, Cache]
//! Applied:  Raw -> Cache -> Logging
//! Result:   Logging(Cache(Raw))
//! ```

use std::sync::Arc;

use tickweave_core::connector::TickweaveConnector;
use tickweave_core::{Middleware, TickweaveError};
use tickweave_types::CacheConfig;

use crate::cache::CacheMiddleware;

/// Generic middleware builder for composing a connector with layered wrappers.
pub struct ConnectorBuilder {
    raw: Arc<dyn TickweaveConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn TickweaveConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add an arbitrary middleware as the new outermost layer.
    #[must_use]
    pub fn with_middleware(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Add (or replace) the reference-data cache layer.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|l| l.name() != "CachingMiddleware");
        self.layers.insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Names of the configured layers, outermost first.
    #[must_use]
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.name()).collect()
    }

    /// Configuration snapshot of every layer, outermost first.
    #[must_use]
    pub fn describe(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.layers
                .iter()
                .map(|l| serde_json::json!({ "name": l.name(), "config": l.config_json() }))
                .collect(),
        )
    }

    /// Apply every layer and return the wrapped connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the same middleware appears twice.
    pub fn build(self) -> Result<Arc<dyn TickweaveConnector>, TickweaveError> {
        let names = self.layer_names();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(TickweaveError::InvalidArg(format!(
                    "middleware '{name}' configured more than once"
                )));
            }
        }
        let mut current = self.raw;
        for layer in self.layers.into_iter().rev() {
            #[cfg(feature = "tracing")]
            tracing::debug!(middleware = layer.name(), "applying middleware layer");
            current = layer.apply(current);
        }
        Ok(current)
    }
}
