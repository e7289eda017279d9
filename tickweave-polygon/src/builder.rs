use std::sync::Arc;

use tickweave_core::TickweaveError;
use tickweave_core::connector::TickweaveConnector;
use tickweave_middleware::ConnectorBuilder as GenericConnectorBuilder;

use crate::{PolygonConfig, PolygonConnector};

/// Builder type alias specialized for Polygon connectors.
pub type PolygonConnectorBuilder = GenericConnectorBuilder;

impl PolygonConnector {
    /// Returns a builder around a connector for `cfg`.
    ///
    /// Add layers (e.g. `.with_cache(..)`) before calling `.build()`.
    ///
    /// # Errors
    /// Propagates errors from [`PolygonConnector::new_raw`].
    pub fn builder(cfg: &PolygonConfig) -> Result<PolygonConnectorBuilder, TickweaveError> {
        let raw: Arc<dyn TickweaveConnector> = Arc::new(Self::new_raw(cfg)?);
        Ok(GenericConnectorBuilder::new(raw))
    }

    /// Builder for a connector configured from `POLYGON_API_KEY`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the key is missing.
    pub fn from_env() -> Result<PolygonConnectorBuilder, TickweaveError> {
        Self::builder(&PolygonConfig::from_env()?)
    }
}
