//! Human-readable rendering of recurrence patterns.
//!
//! Both functions are total: any pattern, including one with an unrecognized
//! type, yields a string. Only `kind`, `interval` and `days_of_week` are read.

use crate::models::{RecurrencePattern, RecurrenceType};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const DAY_CODES: [&str; 7] = ["Su", "M", "T", "W", "Th", "F", "Sa"];

/// Phrase shown in editors and detail views, e.g. "Every 2 weeks on Mon & Thu".
pub fn long_label(pattern: &RecurrencePattern) -> String {
    let interval = pattern.effective_interval();
    match &pattern.kind {
        RecurrenceType::Once => "Does not repeat".to_string(),
        RecurrenceType::Daily => every(interval, "day", "days"),
        RecurrenceType::Weekly => {
            let days = pattern.weekdays();
            if days.is_empty() {
                return every(interval, "week", "weeks");
            }
            match (interval, days.len()) {
                (1, 7) => "Every day".to_string(),
                (_, 7) => format!("Every {} weeks on every day", interval),
                (1, _) => format!("Weekly on {}", day_list(&days)),
                _ => format!("Every {} weeks on {}", interval, day_list(&days)),
            }
        }
        RecurrenceType::Monthly => every(interval, "month", "months"),
        RecurrenceType::Unknown(_) => "Unknown".to_string(),
    }
}

/// Compact badge text, e.g. "DAILY", "3D", "2W MWF".
pub fn short_label(pattern: &RecurrencePattern) -> String {
    let interval = pattern.effective_interval();
    match &pattern.kind {
        RecurrenceType::Once => "ONCE".to_string(),
        RecurrenceType::Daily => badge(interval, "DAILY", "D"),
        RecurrenceType::Weekly => {
            let days = pattern.weekdays();
            if days.is_empty() || days.len() == 7 {
                return badge(interval, "WEEKLY", "W");
            }
            let codes: String = days.iter().map(|&d| DAY_CODES[usize::from(d)]).collect();
            if interval == 1 {
                codes
            } else {
                format!("{}W {}", interval, codes)
            }
        }
        RecurrenceType::Monthly => badge(interval, "MONTHLY", "MO"),
        RecurrenceType::Unknown(_) => "?".to_string(),
    }
}

fn every(interval: u32, unit: &str, units: &str) -> String {
    if interval == 1 {
        format!("Every {}", unit)
    } else {
        format!("Every {} {}", interval, units)
    }
}

fn badge(interval: u32, single: &str, suffix: &str) -> String {
    if interval == 1 {
        single.to_string()
    } else {
        format!("{}{}", interval, suffix)
    }
}

/// "Mon", "Mon & Fri", "Mon, Wed & Fri". Expects sorted days in 0..=6.
fn day_list(days: &[u8]) -> String {
    let names: Vec<&str> = days.iter().map(|&d| DAY_NAMES[usize::from(d)]).collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} & {}", init.join(", "), last),
    }
}
