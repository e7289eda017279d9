use std::fmt;
use std::time::Duration;

use tickweave_core::TickweaveError;

/// Default REST host.
pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

/// Environment variable consulted by [`PolygonConfig::from_env`].
pub const API_KEY_ENV: &str = "POLYGON_API_KEY";

/// Connection settings for the Polygon REST connector.
#[derive(Clone)]
pub struct PolygonConfig {
    /// API key sent as the `apiKey` query parameter.
    pub api_key: String,
    /// Scheme and host (optionally with a path prefix) of the REST API.
    pub base_url: String,
    /// Per-request timeout; `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl fmt::Debug for PolygonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolygonConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PolygonConfig {
    /// Config for the public endpoint with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Read the key from `POLYGON_API_KEY`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the variable is unset or empty.
    pub fn from_env() -> Result<Self, TickweaveError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(TickweaveError::InvalidArg(format!("{API_KEY_ENV} is not set"))),
        }
    }

    /// Point the connector at another host (e.g. a local mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
