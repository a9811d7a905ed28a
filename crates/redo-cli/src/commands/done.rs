use anyhow::Result;
use chrono_tz::Tz;
use owo_colors::{OwoColorize, Style};
use redo_core::label::long_label;
use redo_core::models::CompletionResult;
use redo_core::repository::TaskRepository;
use redo_core::timezone::format_with_timezone;

use crate::cli::DoneCommand;
use crate::util::resolve_task_id;

pub async fn done_task(repo: &impl TaskRepository, command: DoneCommand, timezone: &Tz) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let success_style = Style::new().green().bold();

    match repo.complete_task(task_id).await? {
        CompletionResult::Single(task) => {
            println!("{} Completed task: '{}'", "✓".style(success_style), task.text);
        }
        CompletionResult::Recurring { completed, next } => {
            println!("{} Completed task: '{}'", "✓".style(success_style), completed.text);
            let repeats = next.recurrence.as_ref().map(long_label).unwrap_or_default();
            match next.due_date {
                Some(due_date) => println!(
                    "  {} Next: '{}' due {} ({})",
                    "↻".blue(),
                    next.text,
                    format_with_timezone(due_date, timezone, "%a %Y-%m-%d").cyan(),
                    repeats
                ),
                None => println!("  {} Next: '{}' ({})", "↻".blue(), next.text, repeats),
            }
        }
        CompletionResult::RecurrenceEnded(task) => {
            println!("{} Completed task: '{}'", "✓".style(success_style), task.text);
            println!("  {} This was the last occurrence.", "→".bright_black());
        }
    }

    Ok(())
}
