//! Per-element visibility state machine.
//!
//! Each tracked element owns one `VisibilityTracker`, created on mount and
//! destroyed on unmount. Observation is a scoped resource: attach moves
//! `Unobserved → Observing`, detach releases it again, and an element that
//! unmounts before ever becoming visible leaks nothing and fires nothing.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default fraction of the element's area that must be on-screen.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Lifecycle of one observed element. `Observing → Triggered` is guarded by
/// "intersection ratio ≥ threshold" and irreversible under `track_once`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ObserverState {
    Unobserved,
    Observing,
    Triggered,
}

#[derive(Debug)]
pub struct VisibilityTracker {
    threshold: f64,
    track_once: bool,
    state: ObserverState,
    is_visible: bool,
    has_tracked: bool,
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, true)
    }
}

impl VisibilityTracker {
    pub fn new(threshold: f64, track_once: bool) -> Self {
        Self {
            threshold,
            track_once,
            state: ObserverState::Unobserved,
            is_visible: false,
            has_tracked: false,
        }
    }

    /// Attach to the element; observation begins.
    pub fn observe(&mut self) {
        if self.state == ObserverState::Unobserved {
            self.state = ObserverState::Observing;
        }
    }

    /// Detach from the element, releasing the observation resource. A
    /// tracker that already triggered stays triggered.
    pub fn disconnect(&mut self) {
        self.is_visible = false;
        if self.state == ObserverState::Observing {
            self.state = ObserverState::Unobserved;
        }
    }

    /// Platform callback with the element's current intersection ratio.
    /// Returns true when the caller's "viewed" callback should fire now.
    ///
    /// Fires on the crossing into visibility, not while visibility holds;
    /// with `track_once` the first crossing is also the last.
    pub fn on_intersection(&mut self, ratio: f64) -> bool {
        if self.state == ObserverState::Unobserved {
            return false;
        }

        let was_visible = self.is_visible;
        self.is_visible = ratio >= self.threshold;

        if !self.is_visible || was_visible || self.state == ObserverState::Triggered {
            return false;
        }

        self.has_tracked = true;
        if self.track_once {
            self.state = ObserverState::Triggered;
            debug!(ratio, threshold = self.threshold, "visibility trigger fired");
        }
        true
    }

    pub fn state(&self) -> ObserverState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn has_tracked(&self) -> bool {
        self.has_tracked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_on_threshold_crossing() {
        let mut tracker = VisibilityTracker::new(0.5, true);
        tracker.observe();

        assert!(!tracker.on_intersection(0.2));
        assert!(!tracker.is_visible());

        assert!(tracker.on_intersection(0.6));
        assert!(tracker.is_visible());
        assert_eq!(tracker.state(), ObserverState::Triggered);
    }

    #[test]
    fn test_track_once_survives_double_crossing() {
        let mut tracker = VisibilityTracker::new(0.5, true);
        tracker.observe();

        assert!(tracker.on_intersection(0.8));
        assert!(!tracker.on_intersection(0.0));
        // Visible → hidden → visible again: no second fire
        assert!(!tracker.on_intersection(0.8));
        assert!(tracker.is_visible());
        assert!(tracker.has_tracked());
    }

    #[test]
    fn test_repeat_fire_without_track_once() {
        let mut tracker = VisibilityTracker::new(0.5, false);
        tracker.observe();

        assert!(tracker.on_intersection(0.8));
        assert!(!tracker.on_intersection(0.8));
        assert!(!tracker.on_intersection(0.1));
        assert!(tracker.on_intersection(0.9));
        assert_eq!(tracker.state(), ObserverState::Observing);
    }

    #[test]
    fn test_never_visible_never_fires() {
        let mut tracker = VisibilityTracker::new(0.5, true);
        tracker.observe();

        assert!(!tracker.on_intersection(0.1));
        assert!(!tracker.on_intersection(0.4));
        tracker.disconnect();

        assert!(!tracker.has_tracked());
        assert_eq!(tracker.state(), ObserverState::Unobserved);
    }

    #[test]
    fn test_intersections_ignored_before_observe() {
        let mut tracker = VisibilityTracker::new(0.5, true);
        assert!(!tracker.on_intersection(1.0));
        assert!(!tracker.has_tracked());
    }

    #[test]
    fn test_disconnect_keeps_triggered_state() {
        let mut tracker = VisibilityTracker::new(0.5, true);
        tracker.observe();
        tracker.on_intersection(1.0);
        tracker.disconnect();

        assert_eq!(tracker.state(), ObserverState::Triggered);
        assert!(!tracker.is_visible());
    }
}
