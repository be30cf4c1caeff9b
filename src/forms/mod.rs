//! Form handling
//!
//! Validation and submission outcomes for the two site forms, plus the
//! input helpers the form fields use.
//!
//! - `validation`: required fields, email pattern, date checks
//! - `contact`: general enquiry form
//! - `test_drive`: test-drive booking form
//! - `phone`: "(XXX) XXX-XXXX" formatting for tel inputs

pub mod validation;
pub mod contact;
pub mod test_drive;
pub mod phone;

pub use contact::ContactForm;
pub use test_drive::TestDriveForm;
pub use phone::format_phone;
pub use validation::{is_valid_email, min_date, today_local, validate_future_date, FormError};
