use crate::error::CoreError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Validate IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<(), CoreError> {
    parse_timezone(timezone).map(|_| ())
}

/// Parse an IANA timezone name
pub fn parse_timezone(timezone: &str) -> Result<Tz, CoreError> {
    Tz::from_str(timezone.trim())
        .map_err(|_| CoreError::InvalidTimezone(format!("Invalid timezone: {}", timezone)))
}

/// The current instant in `timezone`
pub fn now_in(timezone: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(timezone)
}

/// Format datetime with timezone-aware display
pub fn format_with_timezone(datetime: DateTime<Utc>, timezone: &Tz, format: &str) -> String {
    datetime.with_timezone(timezone).format(format).to_string()
}
