//! Conversion funnel checkpoints.
//!
//! Each call is independent: stages carry no ordering and repeats are
//! allowed. Enforcing a stricter state machine here would change the
//! observable analytics volume.

use std::sync::Arc;

use chrono::Utc;

use engage_core::{EventDispatcher, FunnelStage, Properties};

pub struct FunnelTracker {
    dispatcher: Arc<EventDispatcher>,
}

impl FunnelTracker {
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Dispatch a stage checkpoint, merging the page path and a client
    /// timestamp over any caller metadata.
    pub fn track(&self, stage: FunnelStage, page: &str, metadata: Option<Properties>) {
        let mut properties = metadata.unwrap_or_default();
        properties.insert("page".to_string(), serde_json::json!(page));
        properties.insert(
            "timestamp".to_string(),
            serde_json::json!(Utc::now().timestamp_millis()),
        );
        self.dispatcher.dispatch(stage.event_name(), properties);
    }
}
