//! Typed trackers — thin wrappers over the dispatcher that fix an event
//! name and property shape, plus the route-change pipeline that keeps the
//! session store ahead of every downstream read.

use std::sync::{Arc, Mutex};

use tracing::debug;
use url::Url;

use engage_core::event::{names, ContactMethod, ExternalPlatform, FormType};
use engage_core::{EventDispatcher, FunnelStage, Properties};
use engage_session::SessionStore;
use engage_visibility::{PortfolioCard, TrackedSection};

use crate::funnel::FunnelTracker;

/// The typed tracking surface for a page. Holds the current path so every
/// tracker can default `page` when the caller doesn't supply one.
pub struct Telemetry {
    dispatcher: Arc<EventDispatcher>,
    session: SessionStore,
    funnel: FunnelTracker,
    current_page: Mutex<String>,
}

impl Telemetry {
    pub fn new(dispatcher: Arc<EventDispatcher>, session: SessionStore) -> Self {
        Self {
            funnel: FunnelTracker::new(dispatcher.clone()),
            dispatcher,
            session,
            current_page: Mutex::new("/".to_string()),
        }
    }

    pub fn dispatcher(&self) -> Arc<EventDispatcher> {
        self.dispatcher.clone()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn current_page(&self) -> String {
        self.current_page.lock().expect("page mutex poisoned").clone()
    }

    fn page_or_current(&self, page: Option<&str>) -> String {
        page.map(str::to_owned).unwrap_or_else(|| self.current_page())
    }

    /// Route-change pipeline: page view, session update, and the landing
    /// funnel checkpoint for the homepage. The session update runs before
    /// any downstream tracker reads session data for this view.
    pub fn page_changed(&self, path: &str) {
        debug!(page = %path, "route changed");
        *self.current_page.lock().expect("page mutex poisoned") = path.to_string();

        self.dispatcher.dispatch_page_view(path);
        self.session.record_page_view();

        if path == "/" {
            self.funnel.track(FunnelStage::Landing, path, None);
        }
    }

    /// CTA clicks also advance the funnel.
    pub fn track_cta_click(&self, label: &str, page: Option<&str>) {
        let page = self.page_or_current(page);
        self.dispatcher.dispatch(
            names::CTA_CLICK,
            Properties::from([
                ("label".to_string(), serde_json::json!(label)),
                ("page".to_string(), serde_json::json!(page)),
            ]),
        );
        self.funnel.track(
            FunnelStage::CtaClick,
            &page,
            Some(Properties::from([(
                "cta_label".to_string(),
                serde_json::json!(label),
            )])),
        );
    }

    /// A portfolio project view; also advances the funnel.
    pub fn track_portfolio_view(&self, project_name: &str, project_category: &str) {
        self.dispatcher.dispatch(
            names::PORTFOLIO_VIEW,
            Properties::from([
                (
                    "project_name".to_string(),
                    serde_json::json!(project_name),
                ),
                (
                    "project_category".to_string(),
                    serde_json::json!(project_category),
                ),
            ]),
        );
        self.funnel.track(
            FunnelStage::PortfolioView,
            &self.current_page(),
            Some(Properties::from([(
                "project".to_string(),
                serde_json::json!(project_name),
            )])),
        );
    }

    /// A contact attempt: form open, email click, and so on.
    pub fn track_contact_attempt(&self, method: ContactMethod, page: Option<&str>) {
        let page = self.page_or_current(page);
        self.dispatcher.dispatch(
            names::CONTACT_ATTEMPT,
            Properties::from([
                ("method".to_string(), serde_json::json!(method.as_str())),
                ("page".to_string(), serde_json::json!(page)),
            ]),
        );
    }

    /// A successful form submission; also the final funnel checkpoint.
    pub fn track_lead_submission(&self, form_type: FormType, page: Option<&str>) {
        let page = self.page_or_current(page);
        self.dispatcher.dispatch(
            names::LEAD_SUBMISSION,
            Properties::from([
                (
                    "form_type".to_string(),
                    serde_json::json!(form_type.as_str()),
                ),
                ("page".to_string(), serde_json::json!(page)),
            ]),
        );
        self.funnel.track(
            FunnelStage::ContactSubmission,
            &page,
            Some(Properties::from([(
                "form_type".to_string(),
                serde_json::json!(form_type.as_str()),
            )])),
        );
    }

    pub fn track_section_view(&self, section_name: &str, page: Option<&str>) {
        let page = self.page_or_current(page);
        self.dispatcher.dispatch(
            names::SECTION_VIEW,
            Properties::from([
                (
                    "section_name".to_string(),
                    serde_json::json!(section_name),
                ),
                ("page".to_string(), serde_json::json!(page)),
            ]),
        );
    }

    pub fn track_external_engagement(&self, platform: ExternalPlatform, page: Option<&str>) {
        let page = self.page_or_current(page);
        self.dispatcher.dispatch(
            names::EXTERNAL_ENGAGEMENT,
            Properties::from([
                (
                    "platform".to_string(),
                    serde_json::json!(platform.as_str()),
                ),
                ("page".to_string(), serde_json::json!(page)),
            ]),
        );
    }

    /// An external link click: engagement plus, when the link doubles as a
    /// CTA, the CTA click.
    pub fn track_external_link(&self, platform: ExternalPlatform, cta_label: Option<&str>) {
        self.track_external_engagement(platform, None);
        if let Some(label) = cta_label {
            self.track_cta_click(label, None);
        }
    }

    /// Copy-to-clipboard on an email address or phone number.
    pub fn track_copy(&self, platform: ExternalPlatform) {
        self.track_external_engagement(platform, None);
    }

    /// Emit an arbitrary funnel checkpoint against the current page.
    pub fn track_funnel_stage(&self, stage: FunnelStage, metadata: Option<Properties>) {
        self.funnel.track(stage, &self.current_page(), metadata);
    }

    /// A tracked section bound to this dispatcher and the current path.
    pub fn tracked_section(&self, section_name: &str) -> TrackedSection {
        TrackedSection::new(section_name, self.current_page(), self.dispatcher.clone())
    }

    /// A portfolio card bound to this dispatcher.
    pub fn portfolio_card(&self, project_name: &str, project_category: &str) -> PortfolioCard {
        PortfolioCard::new(project_name, project_category, self.dispatcher.clone())
    }
}

/// Best-effort platform classification for a link href.
pub fn platform_for_href(href: &str) -> ExternalPlatform {
    if href.starts_with("mailto:") {
        return ExternalPlatform::Email;
    }
    if href.starts_with("tel:") {
        return ExternalPlatform::Phone;
    }
    match Url::parse(href).ok().as_ref().and_then(Url::host_str) {
        Some(host) if host == "github.com" || host.ends_with(".github.com") => {
            ExternalPlatform::Github
        }
        Some(host) if host == "linkedin.com" || host.ends_with(".linkedin.com") => {
            ExternalPlatform::Linkedin
        }
        _ => ExternalPlatform::Other,
    }
}
