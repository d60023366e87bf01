//! Viewport visibility tracking — detects when a region of the page becomes
//! sufficiently visible and fires its "viewed" event exactly once when
//! configured for single-fire behavior.
//!
//! # Modules
//!
//! - [`observer`] — Per-element visibility state machine
//! - [`section`] — Tracked-section and portfolio-card specializations

pub mod observer;
pub mod section;

pub use observer::{ObserverState, VisibilityTracker};
pub use section::{PortfolioCard, TrackedSection};
