//! Collector script injection — builds the collector `<script>` tag and
//! guarantees it lands in the document head at most once, keyed on the
//! site identifier attribute. Skipped entirely under DNT or when the
//! collector is unconfigured.

use tracing::{debug, warn};

use engage_core::{PrivacyGate, TelemetryConfig};

/// Attribute carrying the site identifier; also the dedupe key.
pub const WEBSITE_ID_ATTR: &str = "data-website-id";

/// The collector script element, expressed as head attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptTag {
    pub src: String,
    pub website_id: String,
    pub async_load: bool,
    pub defer: bool,
    pub attributes: Vec<(String, String)>,
}

impl ScriptTag {
    /// All attributes for the rendered tag, the site identifier first.
    pub fn head_attributes(&self) -> Vec<(String, String)> {
        let mut attrs = vec![(WEBSITE_ID_ATTR.to_string(), self.website_id.clone())];
        attrs.extend(self.attributes.iter().cloned());
        attrs
    }

    fn for_config(config: &TelemetryConfig) -> Self {
        Self {
            src: config.script_url.clone(),
            website_id: config.website_id.clone(),
            async_load: true,
            defer: true,
            attributes: vec![
                ("data-auto-track".to_string(), "true".to_string()),
                ("data-do-not-track".to_string(), "true".to_string()),
                ("data-cache".to_string(), "true".to_string()),
            ],
        }
    }
}

/// Minimal model of the scripts living in the document head.
#[derive(Debug, Default)]
pub struct HeadScripts {
    tags: Vec<ScriptTag>,
}

impl HeadScripts {
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    pub fn contains(&self, website_id: &str) -> bool {
        self.tags.iter().any(|t| t.website_id == website_id)
    }

    pub fn tags(&self) -> &[ScriptTag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn append(&mut self, tag: ScriptTag) {
        self.tags.push(tag);
    }

    fn remove(&mut self, website_id: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.website_id != website_id);
        self.tags.len() < before
    }
}

/// Injects the collector script on mount and removes it on unmount.
pub struct ScriptLoader {
    gate: PrivacyGate,
}

impl ScriptLoader {
    pub fn new(gate: PrivacyGate) -> Self {
        Self { gate }
    }

    /// Inject the script tag. Returns true when a tag was appended; DNT,
    /// missing configuration, a malformed script URL, and an already
    /// injected tag all leave the head untouched.
    pub fn mount(&self, head: &mut HeadScripts) -> bool {
        if self.gate.dnt_enabled() {
            debug!("DNT enabled, skipping collector script");
            return false;
        }
        if !self.gate.is_configured() {
            debug!("collector not configured, running in demo mode");
            return false;
        }

        let config = self.gate.config();
        if let Err(e) = config.validate() {
            warn!(error = %e, "refusing to inject collector script");
            return false;
        }
        if head.contains(&config.website_id) {
            return false;
        }

        head.append(ScriptTag::for_config(config));
        debug!(website_id = %config.website_id, "collector script injected");
        true
    }

    /// Remove the script tag on unmount. Returns true when one was removed.
    pub fn unmount(&self, head: &mut HeadScripts) -> bool {
        head.remove(&self.gate.config().website_id)
    }
}
