//! Typed engagement trackers — the tracking surface composed over the
//! dispatcher: typed events with fixed names and shapes, conversion funnel
//! checkpoints, page-load performance, and collector script injection.
//!
//! # Modules
//!
//! - [`trackers`] — The `Telemetry` facade and typed tracker methods
//! - [`funnel`] — Conversion funnel stage tracker
//! - [`perf`] — Page-load performance reporter
//! - [`loader`] — Collector script injection into the document head

pub mod funnel;
pub mod loader;
pub mod perf;
pub mod trackers;

pub use funnel::FunnelTracker;
pub use loader::{HeadScripts, ScriptLoader, ScriptTag};
pub use perf::{NavigationTiming, PerformanceReporter};
pub use trackers::{platform_for_href, Telemetry};
