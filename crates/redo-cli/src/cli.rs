use clap::{Parser, Subcommand, ValueEnum};
use redo_core::models::TaskPriority;

/// A small to-do list with due dates and repeating tasks
#[derive(Parser, Debug)]
#[command(name = "redo", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks
    List(ListCommand),
    /// Mark a task as completed
    Done(DoneCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Show the upcoming dates of a repeating task
    Preview(PreviewCommand),
    /// Rewrite stored recurrence patterns in the current format
    Migrate,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The text of the task
    pub text: String,
    /// The due date of the task
    #[clap(short, long)]
    pub due: Option<String>,
    /// The list the task belongs to
    #[clap(short, long)]
    pub list: Option<String>,
    /// The priority of the task
    #[clap(long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// Human-friendly recurrence frequency
    #[clap(long, value_enum, help = "Repeat the task (daily, weekly, monthly, weekdays)")]
    pub every: Option<RecurrenceShortcut>,
    /// Repeat every N days/weeks/months
    #[clap(long, default_value_t = 1, help = "Repeat every N days, weeks or months")]
    pub interval: u32,
    /// Days of week for weekly recurrence
    #[clap(long, help = "Days of week (mon,tue,wed,thu,fri,sat,sun, weekdays, weekends)")]
    pub on: Option<String>,
    /// End date for recurrence
    #[clap(long, help = "Last day the task may repeat on (e.g., '2025-12-31')")]
    pub until: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Include completed tasks
    #[clap(short, long)]
    pub all: bool,
    /// Only show tasks from this list
    #[clap(short, long)]
    pub list: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to mark as completed
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewCommand {
    /// The ID of the repeating task
    pub id: String,
    /// Number of occurrences to show
    #[clap(short, long)]
    pub count: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceShortcut {
    Daily,
    Weekly,
    Monthly,
    /// Monday through Friday
    Weekdays,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    None,
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for TaskPriority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::None => TaskPriority::None,
            PriorityArg::Low => TaskPriority::Low,
            PriorityArg::Medium => TaskPriority::Medium,
            PriorityArg::High => TaskPriority::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recurring_add() {
        let cli = Cli::try_parse_from([
            "redo", "add", "Gym", "--every", "weekly", "--on", "mon,thu", "--interval", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Add(add) => {
                assert_eq!(add.text, "Gym");
                assert_eq!(add.every, Some(RecurrenceShortcut::Weekly));
                assert_eq!(add.on.as_deref(), Some("mon,thu"));
                assert_eq!(add.interval, 2);
            }
            other => panic!("Expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_interval_defaults_to_one() {
        let cli = Cli::try_parse_from(["redo", "add", "Stretch", "--every", "daily"]).unwrap();
        match cli.command {
            Commands::Add(add) => assert_eq!(add.interval, 1),
            other => panic!("Expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_frequency() {
        assert!(Cli::try_parse_from(["redo", "add", "Party", "--every", "yearly"]).is_err());
    }
}
