//! Call-to-action buttons
//!
//! Each button on the site raises an info toast. Scheduling a test drive also
//! jumps to the booking form and pre-selects the vehicle, or sends the
//! visitor to the contact page when the current page has no booking form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::TrackEvent;
use crate::notification::Notification;

/// Where "schedule test drive" goes when the page has no booking form
pub const TEST_DRIVE_REDIRECT: &str = "contact.html#test-drive-section";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unknown action '{0}'")]
    Unknown(String),

    #[error("action '{0}' needs a target")]
    MissingTarget(ActionKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    ScheduleTestDrive,
    ViewDetails,
    ScheduleConsultation,
    ApplyFinancing,
    ScheduleService,
    GetTradeValue,
    GetProtectionQuote,
    GetDirections,
    CallEmergency,
    LocationDetails,
    ContactTeamMember,
}

impl ActionKind {
    pub fn slug(&self) -> &'static str {
        match self {
            ActionKind::ScheduleTestDrive => "schedule-test-drive",
            ActionKind::ViewDetails => "view-details",
            ActionKind::ScheduleConsultation => "schedule-consultation",
            ActionKind::ApplyFinancing => "apply-financing",
            ActionKind::ScheduleService => "schedule-service",
            ActionKind::GetTradeValue => "trade-value",
            ActionKind::GetProtectionQuote => "protection-quote",
            ActionKind::GetDirections => "directions",
            ActionKind::CallEmergency => "emergency",
            ActionKind::LocationDetails => "location-details",
            ActionKind::ContactTeamMember => "contact-team-member",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "schedule-test-drive" => ActionKind::ScheduleTestDrive,
            "view-details" => ActionKind::ViewDetails,
            "schedule-consultation" => ActionKind::ScheduleConsultation,
            "apply-financing" => ActionKind::ApplyFinancing,
            "schedule-service" => ActionKind::ScheduleService,
            "trade-value" => ActionKind::GetTradeValue,
            "protection-quote" => ActionKind::GetProtectionQuote,
            "directions" => ActionKind::GetDirections,
            "emergency" => ActionKind::CallEmergency,
            "location-details" => ActionKind::LocationDetails,
            "contact-team-member" => ActionKind::ContactTeamMember,
            other => return Err(ActionError::Unknown(other.to_string())),
        };
        Ok(kind)
    }
}

/// One `<option>` of the test-drive vehicle select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

/// What the page should do after a button press
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub notification: Notification,
    /// Element id to scroll into view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<String>,
    /// Option value to select in the vehicle select
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preselect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl ActionOutcome {
    fn toast(message: String) -> Self {
        Self {
            notification: Notification::info(message),
            scroll_to: None,
            preselect: None,
            redirect: None,
        }
    }
}

/// First option whose text contains the vehicle name, ignoring case
pub fn match_vehicle_option<'a>(options: &'a [SelectOption], vehicle: &str) -> Option<&'a SelectOption> {
    let needle = vehicle.to_lowercase();
    options
        .iter()
        .find(|opt| opt.text.to_lowercase().contains(&needle))
}

/// `booking_form` holds the vehicle select options when the current page
/// has the test-drive form, `None` otherwise.
pub fn schedule_test_drive(vehicle: &str, booking_form: Option<&[SelectOption]>) -> ActionOutcome {
    let mut outcome = ActionOutcome::toast(format!(
        "Scheduling test drive for {}. Please fill out the form below.",
        vehicle
    ));
    match booking_form {
        Some(options) => {
            outcome.scroll_to = Some("testDriveForm".to_string());
            outcome.preselect = match_vehicle_option(options, vehicle).map(|o| o.value.clone());
        }
        None => outcome.redirect = Some(TEST_DRIVE_REDIRECT.to_string()),
    }
    outcome
}

/// `Button Click` event for a press. Without the button's own text and
/// class the action slug and `btn` stand in.
pub fn click_event(kind: ActionKind, text: Option<&str>, class: Option<&str>) -> TrackEvent {
    let text = text.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(kind.slug());
    TrackEvent::button_click(text, class.unwrap_or("btn"))
}

/// Run a button action. `target` is the vehicle, location or team member
/// the button refers to.
pub fn perform(
    kind: ActionKind,
    target: Option<&str>,
    booking_form: Option<&[SelectOption]>,
) -> Result<ActionOutcome, ActionError> {
    let target = target.map(str::trim).filter(|t| !t.is_empty());
    let named = |kind: ActionKind| target.ok_or(ActionError::MissingTarget(kind));

    let message = match kind {
        ActionKind::ScheduleTestDrive => {
            return Ok(schedule_test_drive(named(kind)?, booking_form));
        }
        ActionKind::ViewDetails => format!("Loading details for {}...", named(kind)?),
        ActionKind::ScheduleConsultation => "Redirecting to consultation scheduling...".to_string(),
        ActionKind::ApplyFinancing => "Opening financing application...".to_string(),
        ActionKind::ScheduleService => "Opening service scheduling...".to_string(),
        ActionKind::GetTradeValue => "Opening trade-in valuation tool...".to_string(),
        ActionKind::GetProtectionQuote => "Loading protection plan options...".to_string(),
        ActionKind::GetDirections => "Opening directions to our showroom...".to_string(),
        ActionKind::CallEmergency => "Calling emergency support line...".to_string(),
        ActionKind::LocationDetails => {
            format!("Loading details for {} location...", named(kind)?)
        }
        ActionKind::ContactTeamMember => {
            format!("Opening contact form for {}...", named(kind)?)
        }
    };
    Ok(ActionOutcome::toast(message))
}
