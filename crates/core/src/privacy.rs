//! Privacy gate — the one place that decides whether tracking may run.
//!
//! Ambient capability checks (the DNT signal, collector configuration) are
//! consolidated here rather than re-checked at call sites, so the no-leak
//! invariant holds uniformly for every tracker.

use crate::config::TelemetryConfig;

/// The user agent's Do-Not-Track signal. The value `"1"` disables all
/// tracking; any other value, or no signal, allows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoNotTrack(Option<String>);

impl DoNotTrack {
    pub fn from_signal(signal: Option<&str>) -> Self {
        Self(signal.map(str::to_owned))
    }

    /// No signal present.
    pub fn unset() -> Self {
        Self(None)
    }

    pub fn enabled(&self) -> bool {
        self.0.as_deref() == Some("1")
    }
}

/// Pure function of the ambient DNT signal and static collector config;
/// no side effects.
#[derive(Debug, Clone)]
pub struct PrivacyGate {
    config: TelemetryConfig,
    dnt: DoNotTrack,
}

impl PrivacyGate {
    pub fn new(config: TelemetryConfig, dnt: DoNotTrack) -> Self {
        Self { config, dnt }
    }

    pub fn dnt_enabled(&self) -> bool {
        self.dnt.enabled()
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// False when the user agent opts out of tracking or the collector is
    /// unconfigured. In the unconfigured case the dispatcher still runs,
    /// routing events to the local diagnostic sink instead of the network.
    pub fn is_tracking_allowed(&self) -> bool {
        !self.dnt.enabled() && self.config.is_configured()
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }
}
