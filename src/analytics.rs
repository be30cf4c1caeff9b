//! Click and submission tracking
//!
//! Events are written as structured log records on the `analytics` target.
//! There is no collector behind it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const BUTTON_CLICK: &str = "Button Click";
pub const FORM_SUBMISSION: &str = "Form Submission";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEvent {
    pub name: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl TrackEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn button_click(text: &str, class: &str) -> Self {
        Self::new(BUTTON_CLICK)
            .with("buttonText", text.trim())
            .with("buttonType", class)
    }

    pub fn form_submission(form_id: &str, class: &str) -> Self {
        Self::new(FORM_SUBMISSION)
            .with("formId", form_id)
            .with("formClass", class)
    }
}

pub fn track_event(event: &TrackEvent) {
    tracing::info!(
        target: "analytics",
        event = %event.name,
        properties = ?event.properties,
        "track event"
    );
}
