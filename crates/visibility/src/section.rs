//! Ready-made visibility specializations: a generic wrapping section that
//! fires `section_view`, and a portfolio card that fires `portfolio_view`
//! with the project's name and category.

use std::sync::Arc;

use engage_core::event::names;
use engage_core::{EventDispatcher, Properties};

use crate::observer::VisibilityTracker;

/// Wrapping section containers count as viewed at 30% visibility.
pub const SECTION_THRESHOLD: f64 = 0.3;
/// Portfolio cards need half the card on screen.
pub const PORTFOLIO_CARD_THRESHOLD: f64 = 0.5;

/// A page section whose first visibility emits `section_view` once.
pub struct TrackedSection {
    section_name: String,
    page: String,
    tracker: VisibilityTracker,
    dispatcher: Arc<EventDispatcher>,
}

impl TrackedSection {
    pub fn new(
        section_name: impl Into<String>,
        page: impl Into<String>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self::with_threshold(section_name, page, SECTION_THRESHOLD, dispatcher)
    }

    pub fn with_threshold(
        section_name: impl Into<String>,
        page: impl Into<String>,
        threshold: f64,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            section_name: section_name.into(),
            page: page.into(),
            tracker: VisibilityTracker::new(threshold, true),
            dispatcher,
        }
    }

    pub fn mount(&mut self) {
        self.tracker.observe();
    }

    pub fn unmount(&mut self) {
        self.tracker.disconnect();
    }

    pub fn on_intersection(&mut self, ratio: f64) {
        if self.tracker.on_intersection(ratio) {
            self.dispatcher.dispatch(
                names::SECTION_VIEW,
                Properties::from([
                    (
                        "section_name".to_string(),
                        serde_json::json!(self.section_name),
                    ),
                    ("page".to_string(), serde_json::json!(self.page)),
                ]),
            );
        }
    }

    pub fn is_visible(&self) -> bool {
        self.tracker.is_visible()
    }

    pub fn has_tracked(&self) -> bool {
        self.tracker.has_tracked()
    }
}

/// A portfolio card whose first visibility emits `portfolio_view`.
pub struct PortfolioCard {
    project_name: String,
    project_category: String,
    tracker: VisibilityTracker,
    dispatcher: Arc<EventDispatcher>,
}

impl PortfolioCard {
    pub fn new(
        project_name: impl Into<String>,
        project_category: impl Into<String>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            project_category: project_category.into(),
            tracker: VisibilityTracker::new(PORTFOLIO_CARD_THRESHOLD, true),
            dispatcher,
        }
    }

    pub fn mount(&mut self) {
        self.tracker.observe();
    }

    pub fn unmount(&mut self) {
        self.tracker.disconnect();
    }

    pub fn on_intersection(&mut self, ratio: f64) {
        if self.tracker.on_intersection(ratio) {
            self.dispatcher.dispatch(
                names::PORTFOLIO_VIEW,
                Properties::from([
                    (
                        "project_name".to_string(),
                        serde_json::json!(self.project_name),
                    ),
                    (
                        "project_category".to_string(),
                        serde_json::json!(self.project_category),
                    ),
                ]),
            );
        }
    }

    pub fn is_visible(&self) -> bool {
        self.tracker.is_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engage_core::sink::{capture_collector, CaptureCollector};
    use engage_core::{DoNotTrack, PrivacyGate, TelemetryConfig};

    fn dispatcher() -> (Arc<EventDispatcher>, Arc<CaptureCollector>) {
        let collector = capture_collector();
        let gate = PrivacyGate::new(
            TelemetryConfig::new("https://stats.example.com/script.js", "site-1"),
            DoNotTrack::unset(),
        );
        (
            Arc::new(EventDispatcher::new(gate).with_collector(collector.clone())),
            collector,
        )
    }

    #[test]
    fn test_section_view_fires_once_with_properties() {
        let (dispatcher, collector) = dispatcher();
        let mut section = TrackedSection::new("testimonials", "/", dispatcher);
        section.mount();

        section.on_intersection(0.5);
        section.on_intersection(0.0);
        section.on_intersection(0.5);
        section.unmount();

        assert_eq!(collector.count_named(names::SECTION_VIEW), 1);
        let event = &collector.events()[0];
        assert_eq!(
            event.properties["section_name"],
            serde_json::json!("testimonials")
        );
        assert_eq!(event.properties["page"], serde_json::json!("/"));
    }

    #[test]
    fn test_section_below_threshold_never_fires() {
        let (dispatcher, collector) = dispatcher();
        let mut section = TrackedSection::new("faq", "/services", dispatcher);
        section.mount();

        section.on_intersection(0.2);
        section.unmount();

        assert_eq!(collector.count(), 0);
    }

    #[test]
    fn test_portfolio_card_supplies_project_details() {
        let (dispatcher, collector) = dispatcher();
        let mut card = PortfolioCard::new("Atlas CRM", "web_app", dispatcher);
        card.mount();

        // Half the card on screen is the trigger for portfolio cards
        card.on_intersection(0.4);
        assert_eq!(collector.count(), 0);
        card.on_intersection(0.6);

        assert_eq!(collector.count_named(names::PORTFOLIO_VIEW), 1);
        let event = &collector.events()[0];
        assert_eq!(
            event.properties["project_name"],
            serde_json::json!("Atlas CRM")
        );
        assert_eq!(
            event.properties["project_category"],
            serde_json::json!("web_app")
        );
    }
}
