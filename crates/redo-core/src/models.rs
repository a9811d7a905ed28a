use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Recurrence Patterns
// ============================================================================

/// The unit a pattern repeats in.
///
/// `Unknown` keeps a tag this version does not understand so it can be written
/// back unchanged. It never recurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecurrenceType {
    Once,
    Daily,
    Weekly,
    Monthly,
    Unknown(String),
}

impl RecurrenceType {
    pub fn as_str(&self) -> &str {
        match self {
            RecurrenceType::Once => "once",
            RecurrenceType::Daily => "daily",
            RecurrenceType::Weekly => "weekly",
            RecurrenceType::Monthly => "monthly",
            RecurrenceType::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RecurrenceType::from(s.to_string()))
    }
}

impl From<String> for RecurrenceType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "once" => RecurrenceType::Once,
            "daily" => RecurrenceType::Daily,
            "weekly" => RecurrenceType::Weekly,
            "monthly" => RecurrenceType::Monthly,
            _ => RecurrenceType::Unknown(tag),
        }
    }
}

impl From<RecurrenceType> for String {
    fn from(kind: RecurrenceType) -> Self {
        match kind {
            RecurrenceType::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

fn default_interval() -> u32 {
    1
}

/// A repeat rule attached to a task.
///
/// Weekdays are numbered 0 (Sunday) through 6 (Saturday). Dates have
/// date-only semantics; `end_date` is inclusive through the end of that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    #[serde(rename = "type")]
    pub kind: RecurrenceType,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl RecurrencePattern {
    fn new(kind: RecurrenceType, interval: u32) -> Self {
        Self {
            kind,
            interval,
            days_of_week: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn once() -> Self {
        Self::new(RecurrenceType::Once, 1)
    }

    pub fn daily(interval: u32) -> Self {
        Self::new(RecurrenceType::Daily, interval)
    }

    /// Every `interval` weeks on the anchor's weekday.
    pub fn weekly(interval: u32) -> Self {
        Self::new(RecurrenceType::Weekly, interval)
    }

    /// Every `interval` weeks on the given weekday numbers (0 = Sunday).
    pub fn weekly_on(interval: u32, days: &[u8]) -> Self {
        Self {
            days_of_week: days.to_vec(),
            ..Self::new(RecurrenceType::Weekly, interval)
        }
    }

    pub fn monthly(interval: u32) -> Self {
        Self::new(RecurrenceType::Monthly, interval)
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// The step multiplier with a floor of 1, so a stored `0` can never stall a chain.
    #[inline]
    pub fn effective_interval(&self) -> u32 {
        self.interval.max(1)
    }

    /// Selected weekdays, sorted ascending, de-duplicated, out-of-range values removed.
    pub fn weekdays(&self) -> Vec<u8> {
        let mut days: Vec<u8> = self
            .days_of_week
            .iter()
            .copied()
            .filter(|d| *d <= 6)
            .collect();
        days.sort_unstable();
        days.dedup();
        days
    }

    /// Whether this pattern can produce another occurrence at all.
    pub fn repeats(&self) -> bool {
        matches!(
            self.kind,
            RecurrenceType::Daily | RecurrenceType::Weekly | RecurrenceType::Monthly
        )
    }

    /// An end date before the start date leaves no valid occurrence.
    pub fn is_empty_window(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(start), Some(end)) if end < start)
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::label::long_label(self))
    }
}

/// Maps a chrono weekday onto the 0 = Sunday numbering used by patterns.
#[inline]
pub fn weekday_number(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

// ============================================================================
// Tasks
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0}")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(TaskPriority::None),
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

/// A reminder attached to a task. Delivery is scheduled outside this crate;
/// `notification_id` is whatever handle the scheduler returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub remind_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recurrence: Option<RecurrencePattern>,
    #[serde(default)]
    pub is_recurring: bool,
    /// The task that started this recurrence chain
    #[serde(default)]
    pub parent_recurrence_id: Option<Uuid>,
    /// Number of instances generated before this one in the chain
    #[serde(default)]
    pub recurrence_count: u32,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            text: String::new(),
            completed: false,
            completed_at: None,
            created_at: Utc::now(),
            list_id: None,
            priority: TaskPriority::None,
            due_date: None,
            recurrence: None,
            is_recurring: false,
            parent_recurrence_id: None,
            recurrence_count: 0,
            reminders: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub text: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<TaskPriority>,
    pub list_id: Option<String>,
    /// When present and repeating, the task becomes the root of a recurrence chain
    pub recurrence: Option<RecurrencePattern>,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug)]
pub enum CompletionResult {
    /// A task without a repeating pattern
    Single(Task),
    Recurring { completed: Task, next: Task },
    /// The pattern stopped producing occurrences (end date passed, or unknown type)
    RecurrenceEnded(Task),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_effective_interval_floors_zero() {
        assert_eq!(RecurrencePattern::daily(0).effective_interval(), 1);
        assert_eq!(RecurrencePattern::daily(3).effective_interval(), 3);
    }

    #[test]
    fn test_weekdays_sorted_and_deduplicated() {
        let pattern = RecurrencePattern::weekly_on(1, &[5, 1, 3, 1, 9]);
        assert_eq!(pattern.weekdays(), vec![1, 3, 5]);
    }

    #[test]
    fn test_empty_window() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let pattern = RecurrencePattern::daily(1)
            .with_start_date(start)
            .with_end_date(end);
        assert!(pattern.is_empty_window());
        assert!(!RecurrencePattern::daily(1).with_end_date(end).is_empty_window());
    }

    #[test]
    fn test_pattern_wire_shape() {
        let pattern = RecurrencePattern::weekly_on(2, &[1, 5])
            .with_end_date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        let value = serde_json::to_value(&pattern).unwrap();
        assert_eq!(
            value,
            json!({"type": "weekly", "interval": 2, "daysOfWeek": [1, 5], "endDate": "2024-06-30"})
        );
    }

    #[test]
    fn test_unknown_type_keeps_tag() {
        let pattern: RecurrencePattern =
            serde_json::from_value(json!({"type": "fortnightly"})).unwrap();
        assert_eq!(pattern.kind, RecurrenceType::Unknown("fortnightly".to_string()));
        assert_eq!(pattern.interval, 1);
        assert!(!pattern.repeats());
        assert_eq!(serde_json::to_value(&pattern).unwrap()["type"], "fortnightly");
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("HIGH".parse::<TaskPriority>(), Ok(TaskPriority::High));
        assert!("urgent".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn test_task_defaults_when_fields_missing() {
        let task: Task = serde_json::from_value(json!({
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "text": "water plants",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(!task.completed);
        assert_eq!(task.priority, TaskPriority::None);
        assert_eq!(task.recurrence_count, 0);
        assert!(task.reminders.is_empty());
    }
}
