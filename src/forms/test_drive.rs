//! Test-drive booking form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{require, validate_future_date, FormError};
use crate::notification::Notification;

pub const TEST_DRIVE_SUCCESS: &str = "Thank you! Your test drive has been scheduled. \
We will send you a confirmation email shortly.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDriveForm {
    /// Value of the vehicle select
    #[serde(default)]
    pub test_vehicle: String,
    /// Date input value, YYYY-MM-DD
    #[serde(default)]
    pub test_date: String,
    #[serde(default)]
    pub test_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl TestDriveForm {
    /// Vehicle, date and time are required; the date may not be in the past
    pub fn validate(&self, today: NaiveDate) -> Result<NaiveDate, FormError> {
        require(&[
            ("testVehicle", self.test_vehicle.as_str()),
            ("testDate", self.test_date.as_str()),
            ("testTime", self.test_time.as_str()),
        ])?;
        validate_future_date(&self.test_date, today)
    }

    pub fn submit(&self, today: NaiveDate) -> Result<Notification, FormError> {
        let date = self.validate(today)?;
        tracing::debug!(
            vehicle = %self.test_vehicle,
            %date,
            time = %self.test_time,
            "test drive booked"
        );
        Ok(Notification::success(TEST_DRIVE_SUCCESS))
    }
}
