use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_english::{parse_date_string, Dialect};

/// Parse a due date such as "tomorrow", "next friday" or "2025-03-01" into a
/// calendar day relative to `now`
pub fn parse_due_date<Tz: TimeZone>(date_str: &str, now: &DateTime<Tz>) -> Result<NaiveDate>
where
    Tz::Offset: Copy,
{
    let input = date_str.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(input, now.clone(), Dialect::Us)
        .map(|parsed| parsed.date_naive())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", date_str, e))
}

/// Parse days string like "mon,tue,wed", "monday,tuesday", or "weekdays" into
/// day numbers (0 = Sunday)
pub fn parse_days_string(days_str: &str) -> Result<Vec<u8>> {
    let input = days_str.trim().to_lowercase();

    // Handle special day groups
    match input.as_str() {
        "weekdays" | "workdays" => return Ok(vec![1, 2, 3, 4, 5]),
        "weekends" => return Ok(vec![0, 6]),
        "daily" | "everyday" => return Ok(vec![0, 1, 2, 3, 4, 5, 6]),
        _ => {}
    }

    let mut days = Vec::new();
    let mut invalid_days = Vec::new();

    for day in input.split(',') {
        let day = day.trim();
        if day.is_empty() {
            continue;
        }

        let number = match day {
            "sun" | "sunday" | "su" => 0,
            "mon" | "monday" | "m" => 1,
            "tue" | "tuesday" | "tu" => 2,
            "wed" | "wednesday" | "w" => 3,
            "thu" | "thursday" | "th" => 4,
            "fri" | "friday" | "f" => 5,
            "sat" | "saturday" | "sa" => 6,
            _ => {
                invalid_days.push(day.to_string());
                continue;
            }
        };

        if !days.contains(&number) {
            days.push(number);
        }
    }

    if !invalid_days.is_empty() {
        return Err(anyhow!(
            "Invalid day(s): {}\n\nSupported formats:\n  • Full names: 'monday,tuesday,wednesday'\n  • Short names: 'mon,tue,wed'\n  • Single letters: 'm,tu,w,th,f,sa,su'\n  • Groups: 'weekdays', 'weekends', 'daily'",
            invalid_days.join(", ")
        ));
    }

    if days.is_empty() {
        return Err(anyhow!(
            "No valid days specified in: '{}'\n\nExamples:\n  • mon,wed,fri\n  • weekdays",
            days_str
        ));
    }

    days.sort_unstable();
    Ok(days)
}
