use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use redo_core::repository::TaskRepository;

use crate::util::short_id;

pub async fn migrate_tasks(repo: &impl TaskRepository) -> Result<()> {
    let report = repo.migrate().await?;
    let warning_style = Style::new().yellow().bold();

    println!(
        "{} Rewrote storage: {} recurrence pattern(s) in the current format.",
        "✓".green().bold(),
        report.migrated
    );

    for (id, tag) in &report.dropped {
        println!(
            "{} Task {} no longer repeats: '{}' recurrence is not supported.",
            "Warning:".style(warning_style),
            short_id(id).yellow(),
            tag
        );
    }
    for (id, tag) in &report.passed_through {
        println!(
            "{} Task {} keeps unrecognized recurrence type '{}' and will not repeat.",
            "Warning:".style(warning_style),
            short_id(id).yellow(),
            tag
        );
    }
    for id in &report.unreadable {
        println!(
            "{} Task {} had an unreadable recurrence; it was removed.",
            "Warning:".style(warning_style),
            short_id(id).yellow()
        );
    }

    Ok(())
}
