//! Field validation shared by the forms

use std::sync::OnceLock;

use chrono::NaiveDate;
use fancy_regex::Regex;
use thiserror::Error;

use crate::notification::Notification;

/// Validation failures. The display text is what the visitor sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingRequired(Vec<&'static str>),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please select a future date")]
    PastDate,

    #[error("Please enter a valid date")]
    InvalidDate(String),
}

impl FormError {
    pub fn notification(&self) -> Notification {
        Notification::error(self.to_string())
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Loose shape check: something@something.something, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email).unwrap_or(false)
}

/// Names of the fields whose value is empty or whitespace-only
pub fn missing_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

/// Fail with `MissingRequired` when any field is blank
pub fn require(fields: &[(&'static str, &str)]) -> Result<(), FormError> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::MissingRequired(missing))
    }
}

/// Today's date in the server's local timezone
pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Value for the `min` attribute of date inputs
pub fn min_date(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

/// Parse a date input value (YYYY-MM-DD); today is allowed, earlier is not
pub fn validate_future_date(value: &str, today: NaiveDate) -> Result<NaiveDate, FormError> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| FormError::InvalidDate(value.to_string()))?;
    if date < today {
        return Err(FormError::PastDate);
    }
    Ok(date)
}
