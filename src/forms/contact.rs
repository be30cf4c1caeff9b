//! Contact form

use serde::{Deserialize, Serialize};

use super::validation::{is_valid_email, require, FormError};
use crate::notification::Notification;

pub const CONTACT_SUCCESS: &str =
    "Thank you for your message! We will contact you within 24 hours.";

/// Field names follow the form markup (`firstName`, `lastName`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Required fields first, then the email shape
    pub fn validate(&self) -> Result<(), FormError> {
        require(&[
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("message", self.message.as_str()),
        ])?;

        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    /// Toast to show for this submission
    pub fn submit(&self) -> Result<Notification, FormError> {
        self.validate()?;
        tracing::debug!(
            subject = self.subject.as_deref().unwrap_or(""),
            "contact form accepted"
        );
        Ok(Notification::success(CONTACT_SUCCESS))
    }
}
