//! High-intent visitor detection — a time-delayed, event-driven heuristic
//! that flags an engaged visitor.
//!
//! Evaluated twice per page: once on a fixed delay timer armed at mount and
//! once, best-effort, on page unload. The two may both fire; duplicate
//! emissions are accepted looseness, since deduplicating would change the
//! observable analytics volume.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use engage_core::event::names;
use engage_core::{EventDispatcher, Properties};

use crate::session::{SessionData, SessionStore};

pub const HIGH_INTENT_MIN_PAGES: u32 = 3;
pub const HIGH_INTENT_MIN_SECONDS: i64 = 120;
/// Delay before the timer-driven evaluation.
pub const HIGH_INTENT_CHECK_DELAY: Duration = Duration::from_secs(120);

pub struct HighIntentDetector {
    session: SessionStore,
    dispatcher: Arc<EventDispatcher>,
}

/// Cancels the pending timer evaluation when dropped, so no stale callback
/// fires against an unmounted page.
pub struct IntentTimerGuard {
    handle: JoinHandle<()>,
}

impl Drop for IntentTimerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl HighIntentDetector {
    pub fn new(session: SessionStore, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            session,
            dispatcher,
        }
    }

    /// The classification heuristic: 3+ pages viewed, 2+ minutes on site,
    /// or a visitor returning within the last week.
    pub fn is_high_intent(data: &SessionData, returning_visitor: bool) -> bool {
        data.pages_viewed >= HIGH_INTENT_MIN_PAGES
            || data.time_on_site >= HIGH_INTENT_MIN_SECONDS
            || returning_visitor
    }

    /// Evaluate once; emits `high_intent_visit` with the current counts
    /// when the heuristic holds.
    pub fn evaluate(&self) {
        let data = self.session.session_data();
        let returning = self.session.is_returning_visitor();

        if Self::is_high_intent(&data, returning) {
            debug!(
                pages_viewed = data.pages_viewed,
                time_on_site = data.time_on_site,
                returning,
                "high-intent visitor detected"
            );
            self.dispatcher.dispatch(
                names::HIGH_INTENT_VISIT,
                Properties::from([
                    (
                        "pages_viewed".to_string(),
                        serde_json::json!(data.pages_viewed),
                    ),
                    (
                        "time_on_site".to_string(),
                        serde_json::json!(data.time_on_site),
                    ),
                ]),
            );
        }
    }

    /// Arm the delayed evaluation. Dropping the guard cancels it.
    pub fn arm(self: &Arc<Self>, delay: Duration) -> IntentTimerGuard {
        let detector = Arc::clone(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            detector.evaluate();
        });
        IntentTimerGuard { handle }
    }

    /// Arm with the standard delay.
    pub fn mount(self: &Arc<Self>) -> IntentTimerGuard {
        self.arm(HIGH_INTENT_CHECK_DELAY)
    }

    /// Best-effort evaluation on page unload.
    pub fn on_unload(&self) {
        self.evaluate();
    }
}
