use chrono_tz::Tz;
use redo_core::error::CoreError;
use redo_core::timezone::parse_timezone;

/// Detect system timezone
pub fn detect_system_timezone() -> String {
    // Try multiple detection methods
    if let Ok(tz) = std::env::var("TZ") {
        if !tz.is_empty() && parse_timezone(&tz).is_ok() {
            return tz;
        }
    }

    // Use iana-time-zone crate
    if let Ok(tz) = iana_time_zone::get_timezone() {
        if parse_timezone(&tz).is_ok() {
            return tz;
        }
    }

    // Fallback to UTC
    "UTC".to_string()
}

/// The configured timezone, or the system's when none is configured
pub fn resolve_timezone(configured: Option<&str>) -> Result<Tz, CoreError> {
    match configured {
        Some(name) => parse_timezone(name),
        None => parse_timezone(&detect_system_timezone()),
    }
}
