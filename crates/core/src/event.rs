//! Telemetry event types — event names, free-form properties, and the
//! constrained property enums used by the typed trackers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Free-form event properties. Each typed tracker constrains its own shape.
pub type Properties = HashMap<String, serde_json::Value>;

/// Fixed event names emitted by the typed trackers.
pub mod names {
    pub const CTA_CLICK: &str = "cta_click";
    pub const PORTFOLIO_VIEW: &str = "portfolio_view";
    pub const CONTACT_ATTEMPT: &str = "contact_attempt";
    pub const LEAD_SUBMISSION: &str = "lead_submission";
    pub const SECTION_VIEW: &str = "section_view";
    pub const EXTERNAL_ENGAGEMENT: &str = "external_engagement";
    pub const HIGH_INTENT_VISIT: &str = "high_intent_visit";
    pub const PAGE_PERFORMANCE: &str = "page_performance";
    pub const SLOW_PAGE_LOAD: &str = "slow_page_load";
}

/// A single telemetry event. Immutable once constructed; it exists only for
/// the duration of dispatch and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub properties: Properties,
}

/// Coarse checkpoints in the visitor's conversion journey:
/// landing → portfolio view → CTA click → contact submission.
///
/// Stages are not required to occur in order and repeats are allowed; each
/// emission is independent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStage {
    Landing,
    PortfolioView,
    CtaClick,
    ContactSubmission,
}

impl FunnelStage {
    /// The fixed event name this stage maps to.
    pub fn event_name(&self) -> &'static str {
        match self {
            FunnelStage::Landing => "funnel_landing",
            FunnelStage::PortfolioView => "funnel_portfolio_view",
            FunnelStage::CtaClick => "funnel_cta_click",
            FunnelStage::ContactSubmission => "funnel_contact_submission",
        }
    }
}

/// How a visitor attempted to make contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    Form,
    Email,
    Calendly,
    Phone,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Form => "form",
            ContactMethod::Email => "email",
            ContactMethod::Calendly => "calendly",
            ContactMethod::Phone => "phone",
        }
    }
}

/// Which form produced a lead submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    Contact,
    Consultation,
    Newsletter,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Contact => "contact",
            FormType::Consultation => "consultation",
            FormType::Newsletter => "newsletter",
        }
    }
}

/// External destination a visitor engaged with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExternalPlatform {
    Github,
    Linkedin,
    Email,
    Phone,
    Other,
}

impl ExternalPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalPlatform::Github => "github",
            ExternalPlatform::Linkedin => "linkedin",
            ExternalPlatform::Email => "email",
            ExternalPlatform::Phone => "phone",
            ExternalPlatform::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funnel_stage_names() {
        assert_eq!(FunnelStage::Landing.event_name(), "funnel_landing");
        assert_eq!(
            FunnelStage::PortfolioView.event_name(),
            "funnel_portfolio_view"
        );
        assert_eq!(FunnelStage::CtaClick.event_name(), "funnel_cta_click");
        assert_eq!(
            FunnelStage::ContactSubmission.event_name(),
            "funnel_contact_submission"
        );
    }

    #[test]
    fn test_property_enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_value(ContactMethod::Calendly).unwrap(),
            serde_json::json!("calendly")
        );
        assert_eq!(
            serde_json::to_value(FormType::Newsletter).unwrap(),
            serde_json::json!("newsletter")
        );
        assert_eq!(
            serde_json::to_value(ExternalPlatform::Linkedin).unwrap(),
            serde_json::json!("linkedin")
        );
    }

    #[test]
    fn test_event_serde() {
        let event = Event {
            name: names::CTA_CLICK.to_string(),
            properties: Properties::from([
                ("label".to_string(), serde_json::json!("hire_me")),
                ("page".to_string(), serde_json::json!("/")),
            ]),
        };

        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "cta_click");
        assert_eq!(parsed.properties["label"], serde_json::json!("hire_me"));
    }
}
