//! Field-level rules the `validator` derive cannot express on its own.

use chrono::{DateTime, Utc};
use validator::{ValidationError, ValidationErrors};

/// Takes the `date` out of a payload, reporting it as a missing field when absent.
pub fn required_date(date: Option<DateTime<Utc>>) -> Result<DateTime<Utc>, ValidationErrors> {
    date.ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add("date", ValidationError::new("required"));
        errors
    })
}
