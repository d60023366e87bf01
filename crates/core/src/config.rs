use serde::Deserialize;
use url::Url;

use crate::error::{TelemetryError, TelemetryResult};

/// Collector configuration. Loaded once from environment variables with the
/// prefix `ENGAGE_` (e.g. `ENGAGE_SCRIPT_URL`, `ENGAGE_WEBSITE_ID`) and
/// immutable for the process lifetime.
///
/// Both values must be non-empty for tracking to be considered configured;
/// anything less routes events to the local diagnostic sink (demo mode).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub script_url: String,
    #[serde(default)]
    pub website_id: String,
}

impl TelemetryConfig {
    pub fn new(script_url: impl Into<String>, website_id: impl Into<String>) -> Self {
        Self {
            script_url: script_url.into(),
            website_id: website_id.into(),
        }
    }

    /// Load from the process environment. Missing variables are not an
    /// error; they leave the config unconfigured.
    pub fn from_env() -> TelemetryResult<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("ENGAGE").separator("__"))
            .build()
            .map_err(|e| TelemetryError::Config(e.to_string()))?;
        cfg.try_deserialize()
            .map_err(|e| TelemetryError::Config(e.to_string()))
    }

    pub fn is_configured(&self) -> bool {
        !self.script_url.is_empty() && !self.website_id.is_empty()
    }

    /// Checks that a non-empty script URL parses as an absolute URL.
    pub fn validate(&self) -> TelemetryResult<()> {
        if self.script_url.is_empty() {
            return Ok(());
        }
        Url::parse(&self.script_url)
            .map_err(|e| TelemetryError::Config(format!("invalid script URL: {e}")))?;
        Ok(())
    }
}
