//! Engagement telemetry core — event model, collector configuration,
//! privacy gating, and the dispatcher every typed tracker funnels through.
//!
//! # Modules
//!
//! - [`event`] — Event and property types shared by the typed trackers
//! - [`config`] — Collector configuration read from the environment
//! - [`privacy`] — Do-Not-Track signal and the privacy gate
//! - [`dispatch`] — The single dispatch choke point
//! - [`sink`] — Collector client and diagnostic sink traits, plus in-memory
//!   capture sinks shared by tests across the workspace

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod privacy;
pub mod sink;

pub use config::TelemetryConfig;
pub use dispatch::EventDispatcher;
pub use error::{TelemetryError, TelemetryResult};
pub use event::{Event, FunnelStage, Properties};
pub use privacy::{DoNotTrack, PrivacyGate};
