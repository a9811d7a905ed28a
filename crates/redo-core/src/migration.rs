//! Migration of stored recurrence patterns into the current schema.
//!
//! Older versions of the app persisted patterns with a wider set of type tags
//! (`none`, `weekdays`, `biweekly`, `custom`, `yearly`, ...). Loading goes in two
//! steps: [`LegacyPattern::from_value`] classifies the untyped JSON, then
//! [`migrate`] maps each variant onto a canonical [`RecurrencePattern`].
//! Nothing here fails; unusable input degrades to "no pattern".

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{RecurrencePattern, RecurrenceType};

/// Monday through Friday.
const WEEKDAYS: [u8; 5] = [1, 2, 3, 4, 5];

/// Fields shared by every legacy shape, already sanitized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyFields {
    /// `None` when missing, zero, negative or not a number
    pub interval: Option<u32>,
    /// Sorted, unique, within 0..=6
    pub days_of_week: Vec<u8>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl LegacyFields {
    fn from_value(value: &Value) -> Self {
        let mut days_of_week: Vec<u8> = value
            .get("daysOfWeek")
            .and_then(Value::as_array)
            .map(|days| {
                days.iter()
                    .filter_map(Value::as_u64)
                    .filter(|d| *d <= 6)
                    .map(|d| d as u8)
                    .collect()
            })
            .unwrap_or_default();
        days_of_week.sort_unstable();
        days_of_week.dedup();

        Self {
            interval: value.get("interval").and_then(parse_interval),
            days_of_week,
            start_date: value.get("startDate").and_then(parse_date),
            end_date: value.get("endDate").and_then(parse_date),
        }
    }

    fn pattern(self, kind: RecurrenceType, interval: u32, days_of_week: Vec<u8>) -> RecurrencePattern {
        RecurrencePattern {
            kind,
            interval,
            days_of_week,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    fn interval_or_default(&self) -> u32 {
        self.interval.unwrap_or(1)
    }
}

fn parse_interval(value: &Value) -> Option<u32> {
    let raw = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(raw).ok().filter(|n| *n > 0)
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (date taken in the timestamp's own
/// offset) and epoch milliseconds.
fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

/// Every shape a stored pattern may have had over the app's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyPattern {
    /// `null` or missing
    Absent,
    /// Present but not an object with a string `type`
    Malformed,
    None,
    Once,
    Daily(LegacyFields),
    Weekly(LegacyFields),
    Monthly(LegacyFields),
    Weekdays(LegacyFields),
    Biweekly(LegacyFields),
    Custom(LegacyFields),
    Yearly(LegacyFields),
    Unrecognized { tag: String, fields: LegacyFields },
}

impl LegacyPattern {
    pub fn from_value(value: &Value) -> Self {
        if value.is_null() {
            return LegacyPattern::Absent;
        }
        let Some(tag) = value.get("type").and_then(Value::as_str) else {
            return LegacyPattern::Malformed;
        };

        let fields = LegacyFields::from_value(value);
        match tag.trim().to_ascii_lowercase().as_str() {
            "none" => LegacyPattern::None,
            "once" => LegacyPattern::Once,
            "daily" => LegacyPattern::Daily(fields),
            "weekly" => LegacyPattern::Weekly(fields),
            "monthly" => LegacyPattern::Monthly(fields),
            "weekdays" => LegacyPattern::Weekdays(fields),
            "biweekly" => LegacyPattern::Biweekly(fields),
            "custom" => LegacyPattern::Custom(fields),
            "yearly" => LegacyPattern::Yearly(fields),
            _ => LegacyPattern::Unrecognized {
                tag: tag.to_string(),
                fields,
            },
        }
    }
}

/// What happened to one stored pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Mapped onto (or already in) the canonical schema
    Migrated(RecurrencePattern),
    /// Unrecognized tag carried forward as [`RecurrenceType::Unknown`]
    PassedThrough(RecurrencePattern),
    /// A retired type with no canonical equivalent; the task stops recurring
    Dropped { tag: String },
    /// Nothing stored
    NoPattern,
    /// Something stored, but not a pattern
    Unreadable,
}

impl MigrationOutcome {
    pub fn pattern(&self) -> Option<&RecurrencePattern> {
        match self {
            MigrationOutcome::Migrated(p) | MigrationOutcome::PassedThrough(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_pattern(self) -> Option<RecurrencePattern> {
        match self {
            MigrationOutcome::Migrated(p) | MigrationOutcome::PassedThrough(p) => Some(p),
            _ => None,
        }
    }
}

/// Maps a classified legacy pattern onto the canonical schema.
///
/// `yearly` is dropped and unrecognized tags pass through; both emit a
/// warning so the loss or oddity is visible in logs.
pub fn migrate(legacy: LegacyPattern) -> MigrationOutcome {
    match legacy {
        LegacyPattern::Absent => MigrationOutcome::NoPattern,
        LegacyPattern::Malformed => {
            debug!("stored recurrence is not a pattern object, ignoring it");
            MigrationOutcome::Unreadable
        }
        LegacyPattern::None | LegacyPattern::Once => {
            MigrationOutcome::Migrated(RecurrencePattern::once())
        }
        LegacyPattern::Daily(fields) => {
            let interval = fields.interval_or_default();
            MigrationOutcome::Migrated(fields.pattern(RecurrenceType::Daily, interval, Vec::new()))
        }
        LegacyPattern::Weekly(fields) => {
            let interval = fields.interval_or_default();
            let days = fields.days_of_week.clone();
            MigrationOutcome::Migrated(fields.pattern(RecurrenceType::Weekly, interval, days))
        }
        LegacyPattern::Monthly(fields) => {
            let interval = fields.interval_or_default();
            MigrationOutcome::Migrated(fields.pattern(RecurrenceType::Monthly, interval, Vec::new()))
        }
        LegacyPattern::Weekdays(fields) => MigrationOutcome::Migrated(fields.pattern(
            RecurrenceType::Weekly,
            1,
            WEEKDAYS.to_vec(),
        )),
        LegacyPattern::Biweekly(fields) => {
            let days = fields.days_of_week.clone();
            MigrationOutcome::Migrated(fields.pattern(RecurrenceType::Weekly, 2, days))
        }
        LegacyPattern::Custom(fields) => {
            let days = fields.days_of_week.clone();
            MigrationOutcome::Migrated(fields.pattern(RecurrenceType::Weekly, 1, days))
        }
        LegacyPattern::Yearly(_) => {
            warn!("dropping retired 'yearly' recurrence; the task will no longer repeat");
            MigrationOutcome::Dropped {
                tag: "yearly".to_string(),
            }
        }
        LegacyPattern::Unrecognized { tag, fields } => {
            warn!(tag = %tag, "unrecognized recurrence type, keeping it unchanged");
            let interval = fields.interval_or_default();
            let days = fields.days_of_week.clone();
            MigrationOutcome::PassedThrough(fields.pattern(RecurrenceType::Unknown(tag), interval, days))
        }
    }
}

/// Classifies and migrates one stored pattern.
///
/// Applying this to the serialized form of its own output yields the same
/// result.
pub fn normalize_pattern(value: &Value) -> Option<RecurrencePattern> {
    migrate(LegacyPattern::from_value(value)).into_pattern()
}

/// Summary of a storage load, for surfacing dropped or odd patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Patterns now in canonical form
    pub migrated: usize,
    /// (task id, tag) of patterns kept with an unrecognized type
    pub passed_through: Vec<(Uuid, String)>,
    /// (task id, tag) of patterns removed
    pub dropped: Vec<(Uuid, String)>,
    /// Tasks whose stored recurrence could not be read
    pub unreadable: Vec<Uuid>,
}

impl MigrationReport {
    pub fn record(&mut self, task_id: Uuid, outcome: &MigrationOutcome) {
        match outcome {
            MigrationOutcome::Migrated(_) => self.migrated += 1,
            MigrationOutcome::PassedThrough(pattern) => self
                .passed_through
                .push((task_id, pattern.kind.as_str().to_string())),
            MigrationOutcome::Dropped { tag } => self.dropped.push((task_id, tag.clone())),
            MigrationOutcome::Unreadable => self.unreadable.push(task_id),
            MigrationOutcome::NoPattern => {}
        }
    }

    pub fn has_warnings(&self) -> bool {
        !(self.passed_through.is_empty() && self.dropped.is_empty() && self.unreadable.is_empty())
    }
}
