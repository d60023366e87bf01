//! Event dispatcher — the single funnel every typed event passes through
//! before reaching the external collector or the local diagnostic sink.
//!
//! Trackers never call the collector directly. Telemetry must never break
//! the page: every entry point here is total, and a failing transport only
//! costs the event.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::event::{Event, Properties};
use crate::privacy::PrivacyGate;
use crate::sink::{
    diagnostic, tracing_diagnostics, CollectorClient, DiagnosticKind, DiagnosticSink,
};

pub struct EventDispatcher {
    gate: PrivacyGate,
    collector: Option<Arc<dyn CollectorClient>>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl EventDispatcher {
    pub fn new(gate: PrivacyGate) -> Self {
        Self {
            gate,
            collector: None,
            diagnostics: tracing_diagnostics(),
        }
    }

    /// Attach a collector client. Called once the collector script has
    /// loaded; without it the dispatcher runs in demo mode.
    pub fn with_collector(mut self, collector: Arc<dyn CollectorClient>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Replace the diagnostic sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn gate(&self) -> &PrivacyGate {
        &self.gate
    }

    /// Dispatch a named event with its properties.
    ///
    /// Under DNT the event is dropped with nothing beyond a debug trace.
    /// With a configured collector present, the transport call is guarded;
    /// a failure is logged and recorded, never propagated. Otherwise the
    /// event goes to the diagnostic sink (demo mode).
    pub fn dispatch(&self, name: &str, properties: Properties) {
        if self.gate.dnt_enabled() {
            debug!(event = %name, "DNT enabled, skipping event");
            return;
        }

        let event = Event {
            name: name.to_string(),
            properties,
        };

        match &self.collector {
            Some(collector) if self.gate.is_configured() => {
                match collector.track(&event.name, &event.properties) {
                    Ok(()) => debug!(event = %event.name, "event tracked"),
                    Err(e) => {
                        warn!(event = %event.name, error = %e, "failed to track event, dropping");
                        self.diagnostics.record(diagnostic(
                            DiagnosticKind::TransportFailure,
                            event,
                            Some(e.to_string()),
                        ));
                    }
                }
            }
            _ => {
                debug!(event = %event.name, "collector unavailable, demo mode");
                self.diagnostics
                    .record(diagnostic(DiagnosticKind::DemoEvent, event, None));
            }
        }
    }

    /// Page views are tracked by path: the collector resolves a bare
    /// tracked name as the page URL, so the path travels as the event name
    /// with no properties.
    pub fn dispatch_page_view(&self, path: &str) {
        self.dispatch(path, Properties::new());
    }
}
