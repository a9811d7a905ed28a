use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::calendar::{add_days, add_months, end_of_day, local_date};
use crate::models::{weekday_number, RecurrencePattern, RecurrenceType, Task};

/// Result of asking a pattern for its next date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    Next(NaiveDate),
    /// No further occurrence exists. Not an error.
    Terminated,
}

impl Occurrence {
    #[inline]
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Occurrence::Next(date) => Some(date),
            Occurrence::Terminated => None,
        }
    }

    #[inline]
    pub fn is_terminated(self) -> bool {
        matches!(self, Occurrence::Terminated)
    }
}

impl From<Option<NaiveDate>> for Occurrence {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(Occurrence::Terminated, Occurrence::Next)
    }
}

// ============================================================================
// Occurrence Calculator
// ============================================================================

/// Computes the occurrence that follows `anchor` under `pattern`.
///
/// # Behavior
/// - `once` and unrecognized types never recur
/// - `daily`: `anchor + interval` days
/// - `weekly` without days: `anchor + 7 * interval` days
/// - `weekly` with days: the next selected weekday later in the anchor's week;
///   otherwise wrap to the first selected weekday, skipping `interval - 1`
///   extra weeks
/// - `monthly`: `anchor + interval` months, clamped to the month's last day
/// - the candidate is dropped if it falls after `end_date`
/// - a pattern whose `end_date` precedes its `start_date` terminates at once
pub fn next_occurrence(anchor: NaiveDate, pattern: &RecurrencePattern) -> Occurrence {
    if pattern.is_empty_window() {
        return Occurrence::Terminated;
    }

    let interval = pattern.effective_interval();
    let candidate = match pattern.kind {
        RecurrenceType::Once | RecurrenceType::Unknown(_) => return Occurrence::Terminated,
        RecurrenceType::Daily => add_days(anchor, u64::from(interval)),
        RecurrenceType::Weekly => next_weekly(anchor, &pattern.weekdays(), interval),
        RecurrenceType::Monthly => add_months(anchor, interval),
    };

    match candidate {
        Some(date) if pattern.end_date.is_some_and(|end| date > end) => Occurrence::Terminated,
        other => other.into(),
    }
}

/// Weekly step. `days` must be sorted ascending and within 0..=6.
fn next_weekly(anchor: NaiveDate, days: &[u8], interval: u32) -> Option<NaiveDate> {
    let Some(&first) = days.first() else {
        return add_days(anchor, 7 * u64::from(interval));
    };

    let current = weekday_number(anchor.weekday());
    if let Some(&later) = days.iter().find(|&&d| d > current) {
        return add_days(anchor, u64::from(later - current));
    }

    let until_wrap = u64::from(7 - current + first);
    add_days(anchor, until_wrap + 7 * u64::from(interval - 1))
}

/// Lists up to `count` occurrences following `anchor`, stopping early when the
/// pattern terminates.
pub fn preview_occurrences(
    anchor: NaiveDate,
    pattern: &RecurrencePattern,
    count: usize,
) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count.min(64));
    let mut current = anchor;
    while dates.len() < count {
        match next_occurrence(current, pattern) {
            Occurrence::Next(date) => {
                dates.push(date);
                current = date;
            }
            Occurrence::Terminated => break,
        }
    }
    dates
}

// ============================================================================
// Instance Factory
// ============================================================================

/// Builds the task instance that follows a just-completed recurring task.
///
/// `now` supplies both the fallback anchor (when the task has no due date) and
/// the timezone whose calendar is used for "end of day". The input is never
/// modified; the returned task is a fresh record with its own identity.
///
/// Returns `None` when the task has no repeating pattern or the pattern has
/// run past its end date.
pub fn build_next_instance<Tz: TimeZone>(completed: &Task, now: &DateTime<Tz>) -> Option<Task> {
    let pattern = completed.recurrence.as_ref()?;
    if pattern.kind == RecurrenceType::Once {
        return None;
    }

    let tz = now.timezone();
    let anchor = match completed.due_date {
        Some(due) => local_date(&due, &tz),
        None => now.date_naive(),
    };

    let next_date = match next_occurrence(anchor, pattern) {
        Occurrence::Next(date) => date,
        Occurrence::Terminated => {
            debug!(task_id = %completed.id, kind = %pattern.kind, "recurrence chain terminated");
            return None;
        }
    };
    let due_date = end_of_day(next_date, &tz);
    if let Some(end) = pattern.end_date {
        if due_date > end_of_day(end, &tz) {
            return None;
        }
    }

    let next = Task {
        id: Uuid::now_v7(),
        text: completed.text.clone(),
        completed: false,
        completed_at: None,
        created_at: now.with_timezone(&Utc),
        list_id: completed.list_id.clone(),
        priority: completed.priority.clone(),
        due_date: Some(due_date),
        recurrence: Some(pattern.clone()),
        is_recurring: true,
        parent_recurrence_id: Some(completed.parent_recurrence_id.unwrap_or(completed.id)),
        recurrence_count: completed.recurrence_count.saturating_add(1),
        reminders: Vec::new(),
    };
    debug!(
        task_id = %completed.id,
        next_id = %next.id,
        due = %next_date,
        count = next.recurrence_count,
        "built next recurring instance"
    );
    Some(next)
}
