//! Page-load performance reporting.
//!
//! A one-time callback fires when navigation completes; the load duration
//! is `load_event_end − fetch_start` from the document's navigation timing
//! entry. No entry means no event, silently.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use engage_core::event::names;
use engage_core::{EventDispatcher, Properties};

/// Loads over this are flagged slow and double-reported. Fixed threshold,
/// not configurable.
pub const SLOW_LOAD_THRESHOLD_MS: f64 = 3000.0;

/// Navigation timing for the current document, milliseconds since the time
/// origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NavigationTiming {
    pub fetch_start: f64,
    pub load_event_end: f64,
}

impl NavigationTiming {
    pub fn load_time_ms(&self) -> f64 {
        self.load_event_end - self.fetch_start
    }
}

/// One-shot reporter for page-load completion.
pub struct PerformanceReporter {
    dispatcher: Arc<EventDispatcher>,
    reported: bool,
}

impl PerformanceReporter {
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            dispatcher,
            reported: false,
        }
    }

    /// Load-completion callback. Emits `page_performance`, plus
    /// `slow_page_load` when over threshold; reports at most once.
    pub fn on_load(&mut self, page: &str, timing: Option<NavigationTiming>) {
        if self.reported {
            return;
        }
        let Some(timing) = timing else {
            debug!("no navigation timing entry, skipping performance report");
            return;
        };

        let load_time = timing.load_time_ms();
        let is_slow = load_time > SLOW_LOAD_THRESHOLD_MS;

        self.dispatcher.dispatch(
            names::PAGE_PERFORMANCE,
            Properties::from([
                ("load_time".to_string(), serde_json::json!(load_time)),
                ("page".to_string(), serde_json::json!(page)),
                ("is_slow".to_string(), serde_json::json!(is_slow)),
            ]),
        );

        if is_slow {
            self.dispatcher.dispatch(
                names::SLOW_PAGE_LOAD,
                Properties::from([
                    ("load_time".to_string(), serde_json::json!(load_time)),
                    ("page".to_string(), serde_json::json!(page)),
                ]),
            );
        }

        self.reported = true;
    }
}
