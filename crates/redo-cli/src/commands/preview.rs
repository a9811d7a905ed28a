use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use redo_core::calendar::local_date;
use redo_core::error::CoreError;
use redo_core::label::{long_label, short_label};
use redo_core::recurrence::preview_occurrences;
use redo_core::repository::TaskRepository;
use redo_core::timezone::now_in;

use crate::cli::PreviewCommand;
use crate::config::Config;
use crate::util::resolve_task_id;

pub async fn preview_task(
    repo: &impl TaskRepository,
    command: PreviewCommand,
    config: &Config,
    timezone: &Tz,
) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let task = repo
        .find_task_by_id(task_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(task_id.to_string()))?;
    let pattern = task
        .recurrence
        .as_ref()
        .filter(|p| p.repeats())
        .ok_or_else(|| anyhow!("Task '{}' does not repeat", task.text))?;

    let anchor = task
        .due_date
        .map(|due| local_date(&due, timezone))
        .unwrap_or_else(|| now_in(timezone).date_naive());
    let count = command.count.unwrap_or(config.preview_count);
    let dates = preview_occurrences(anchor, pattern, count);

    println!(
        "{} {} [{}]",
        task.text.bright_white().bold(),
        long_label(pattern).cyan(),
        short_label(pattern).yellow()
    );
    if dates.is_empty() {
        println!("  No upcoming occurrences.");
        return Ok(());
    }
    for date in dates {
        println!("  {} {}", "•".bright_black(), date.format("%a %Y-%m-%d"));
    }
    if let Some(end) = pattern.end_date {
        println!("  {} until {}", "→".bright_black(), end.format("%Y-%m-%d"));
    }

    Ok(())
}
