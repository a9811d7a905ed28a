use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use owo_colors::{OwoColorize, Style};
use redo_core::calendar::end_of_day;
use redo_core::label::long_label;
use redo_core::models::{NewTaskData, RecurrencePattern};
use redo_core::repository::TaskRepository;
use redo_core::timezone::{format_with_timezone, now_in};

use crate::cli::{AddCommand, RecurrenceShortcut};
use crate::config::Config;
use crate::parser::{parse_days_string, parse_due_date};

pub async fn add_task(
    repo: &impl TaskRepository,
    command: AddCommand,
    config: &Config,
    timezone: &Tz,
) -> Result<()> {
    let now = now_in(timezone);
    let due_day = command
        .due
        .as_deref()
        .map(|d| parse_due_date(d, &now))
        .transpose()?;
    let until = command
        .until
        .as_deref()
        .map(|d| parse_due_date(d, &now))
        .transpose()?;

    let recurrence = build_pattern(&command, until)?
        .map(|pattern| pattern.with_start_date(due_day.unwrap_or_else(|| now.date_naive())));

    let new_task_data = NewTaskData {
        text: command.text,
        due_date: due_day.map(|day| end_of_day(day, timezone)),
        priority: command.priority.map(Into::into),
        list_id: command.list.or_else(|| config.default_list.clone()),
        recurrence,
        reminders: Vec::new(),
    };

    let added_task = repo.add_task(new_task_data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    if added_task.is_recurring {
        println!(
            "{} Created repeating task: {}",
            "✓".style(success_style),
            added_task.text.bright_white().bold()
        );
    } else {
        println!(
            "{} Created task: {}",
            "✓".style(success_style),
            added_task.text.bright_white().bold()
        );
    }
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        added_task.id.to_string().yellow()
    );
    if let Some(due_date) = added_task.due_date {
        println!(
            "  {} Due: {}",
            "→".style(info_style),
            format_with_timezone(due_date, timezone, "%a %Y-%m-%d").cyan()
        );
    }
    if let Some(pattern) = &added_task.recurrence {
        println!("  {} Repeats: {}", "→".style(info_style), long_label(pattern).cyan());
    }

    Ok(())
}

/// Turn the `--every/--interval/--on/--until` flags into a pattern.
/// `--on` on its own implies a weekly repeat.
fn build_pattern(
    command: &AddCommand,
    until: Option<NaiveDate>,
) -> Result<Option<RecurrencePattern>> {
    let days = command.on.as_deref().map(parse_days_string).transpose()?;
    let interval = command.interval;

    let pattern = match (command.every, days) {
        (None, None) => {
            if until.is_some() {
                return Err(anyhow!("--until only applies to repeating tasks; add --every"));
            }
            return Ok(None);
        }
        (Some(RecurrenceShortcut::Daily), None) => RecurrencePattern::daily(interval),
        (Some(RecurrenceShortcut::Monthly), None) => RecurrencePattern::monthly(interval),
        (Some(RecurrenceShortcut::Weekly), None) => RecurrencePattern::weekly(interval),
        (Some(RecurrenceShortcut::Weekly) | None, Some(days)) => {
            RecurrencePattern::weekly_on(interval, &days)
        }
        (Some(RecurrenceShortcut::Weekdays), None) => {
            RecurrencePattern::weekly_on(interval, &[1, 2, 3, 4, 5])
        }
        (Some(shortcut), Some(_)) => {
            return Err(anyhow!(
                "--on cannot be combined with --every {:?}; use --every weekly",
                shortcut
            ))
        }
    };

    Ok(Some(match until {
        Some(end) => pattern.with_end_date(end),
        None => pattern,
    }))
}
