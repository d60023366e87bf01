//! Collector and diagnostic sinks — traits for delivering events to the
//! external collector and for observing what the dispatcher did with them.
//!
//! Trackers accept an `Arc<dyn CollectorClient>` when the collector script
//! has loaded; its absence is a normal, expected state (demo mode), not an
//! error. The diagnostic sink makes demo-mode events and swallowed transport
//! failures observable so tests can assert on them.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::event::{Event, Properties};

/// Client for the external collector's `track(name, properties)` call.
pub trait CollectorClient: Send + Sync {
    fn track(&self, name: &str, properties: &Properties) -> anyhow::Result<()>;
}

/// What the dispatcher did with an event that never reached the collector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Collector absent or unconfigured; event routed to the local sink.
    DemoEvent,
    /// The collector call failed; event dropped.
    TransportFailure,
}

/// A diagnostic record emitted by the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub id: Uuid,
    pub kind: DiagnosticKind,
    pub event: Event,
    pub detail: Option<String>,
    pub at: DateTime<Utc>,
}

/// Convenience builder for a diagnostic entry.
pub fn diagnostic(kind: DiagnosticKind, event: Event, detail: Option<String>) -> DiagnosticEntry {
    DiagnosticEntry {
        id: Uuid::new_v4(),
        kind,
        event,
        detail,
        at: Utc::now(),
    }
}

/// Sink for dispatcher diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, entry: DiagnosticEntry);
}

/// No-op sink for callers that don't observe diagnostics.
pub struct NoOpDiagnostics;

impl DiagnosticSink for NoOpDiagnostics {
    fn record(&self, _entry: DiagnosticEntry) {}
}

/// Default sink that writes diagnostics to the tracing log.
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn record(&self, entry: DiagnosticEntry) {
        match entry.kind {
            DiagnosticKind::DemoEvent => {
                debug!(event = %entry.event.name, properties = ?entry.event.properties, "demo mode event")
            }
            DiagnosticKind::TransportFailure => {
                warn!(event = %entry.event.name, detail = ?entry.detail, "collector transport failure")
            }
        }
    }
}

/// In-memory sink that captures diagnostic entries for testing.
#[derive(Default)]
pub struct CaptureDiagnostics {
    entries: Mutex<Vec<DiagnosticEntry>>,
}

impl CaptureDiagnostics {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.entries.lock().expect("diagnostic mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().expect("diagnostic mutex poisoned").len()
    }

    pub fn count_kind(&self, kind: DiagnosticKind) -> usize {
        self.entries
            .lock()
            .expect("diagnostic mutex poisoned")
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }

    pub fn clear(&self) {
        self.entries.lock().expect("diagnostic mutex poisoned").clear();
    }
}

impl DiagnosticSink for CaptureDiagnostics {
    fn record(&self, entry: DiagnosticEntry) {
        self.entries.lock().expect("diagnostic mutex poisoned").push(entry);
    }
}

/// In-memory collector that captures delivered events for testing.
#[derive(Default)]
pub struct CaptureCollector {
    events: Mutex<Vec<Event>>,
}

impl CaptureCollector {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("collector mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().expect("collector mutex poisoned").len()
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.events
            .lock()
            .expect("collector mutex poisoned")
            .iter()
            .filter(|e| e.name == name)
            .count()
    }
}

impl CollectorClient for CaptureCollector {
    fn track(&self, name: &str, properties: &Properties) -> anyhow::Result<()> {
        self.events.lock().expect("collector mutex poisoned").push(Event {
            name: name.to_string(),
            properties: properties.clone(),
        });
        Ok(())
    }
}

/// Convenience: the default tracing-backed diagnostic sink.
pub fn tracing_diagnostics() -> Arc<dyn DiagnosticSink> {
    Arc::new(TracingDiagnostics)
}

/// Convenience: a no-op diagnostic sink.
pub fn noop_diagnostics() -> Arc<dyn DiagnosticSink> {
    Arc::new(NoOpDiagnostics)
}

/// Convenience: a capture diagnostic sink for tests.
pub fn capture_diagnostics() -> Arc<CaptureDiagnostics> {
    Arc::new(CaptureDiagnostics::new())
}

/// Convenience: a capture collector for tests.
pub fn capture_collector() -> Arc<CaptureCollector> {
    Arc::new(CaptureCollector::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::names;

    #[test]
    fn test_capture_diagnostics() {
        let sink = capture_diagnostics();
        assert_eq!(sink.count(), 0);

        sink.record(diagnostic(
            DiagnosticKind::DemoEvent,
            Event {
                name: names::CTA_CLICK.to_string(),
                properties: Properties::new(),
            },
            None,
        ));
        sink.record(diagnostic(
            DiagnosticKind::TransportFailure,
            Event {
                name: names::SECTION_VIEW.to_string(),
                properties: Properties::new(),
            },
            Some("connection reset".to_string()),
        ));

        assert_eq!(sink.count(), 2);
        assert_eq!(sink.count_kind(DiagnosticKind::DemoEvent), 1);
        assert_eq!(sink.count_kind(DiagnosticKind::TransportFailure), 1);

        let entries = sink.entries();
        assert_eq!(entries[0].event.name, "cta_click");
        assert_eq!(entries[1].detail, Some("connection reset".to_string()));
    }

    #[test]
    fn test_capture_collector() {
        let collector = capture_collector();
        let props = Properties::from([("page".to_string(), serde_json::json!("/portfolio"))]);
        collector.track(names::PORTFOLIO_VIEW, &props).unwrap();

        assert_eq!(collector.count(), 1);
        assert_eq!(collector.count_named("portfolio_view"), 1);
        assert_eq!(
            collector.events()[0].properties["page"],
            serde_json::json!("/portfolio")
        );
    }
}
