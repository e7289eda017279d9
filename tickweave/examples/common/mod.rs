use std::sync::Arc;
use std::time::Duration;

use tickweave::{CacheConfig, TickweaveConnector};
use tickweave_polygon::{PolygonConfig, PolygonConnector};

/// Polygon when `POLYGON_API_KEY` is set (with the reference cache), the
/// deterministic mock otherwise or when `TICKWEAVE_EXAMPLES_USE_MOCK` is set.
#[must_use]
pub fn get_connector() -> Arc<dyn TickweaveConnector> {
    if std::env::var("TICKWEAVE_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector) ---");
        return Arc::new(tickweave_mock::MockConnector::new());
    }
    match PolygonConfig::from_env() {
        Ok(cfg) => PolygonConnector::builder(&cfg.with_timeout(Duration::from_secs(30)))
            .and_then(|b| b.with_cache(&CacheConfig::default()).build())
            .unwrap_or_else(|e| panic!("polygon connector: {e}")),
        Err(_) => {
            println!("--- (POLYGON_API_KEY not set, using Mock Connector) ---");
            Arc::new(tickweave_mock::MockConnector::new())
        }
    }
}

/// Install a `RUST_LOG`-driven subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
