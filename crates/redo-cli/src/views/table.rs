use chrono::{DateTime, Utc};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use redo_core::label::short_label;
use redo_core::models::{Task, TaskPriority};
use uuid::Uuid;

use crate::util::short_id;

#[derive(Debug, Clone)]
pub struct ViewTask {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub list_id: Option<String>,
    /// Short recurrence badge, e.g. "MWF" or "2W"
    pub repeat: Option<String>,
}

impl From<&Task> for ViewTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            text: task.text.clone(),
            completed: task.completed,
            priority: task.priority.clone(),
            due_date: task.due_date,
            list_id: task.list_id.clone(),
            repeat: task
                .recurrence
                .as_ref()
                .filter(|p| task.is_recurring || p.repeats())
                .map(short_label),
        }
    }
}

pub fn display_tasks(tasks: &[ViewTask]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Task", "Due", "Repeats", "List"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(&task.id)));

        let mut display_text = String::new();
        if task.repeat.is_some() {
            display_text.push('↻');
            display_text.push(' ');
        }
        display_text.push_str(&task.text);

        let mut text_cell = Cell::new(display_text);
        text_cell = if task.completed {
            text_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey)
        } else {
            match task.priority {
                TaskPriority::High => text_cell.fg(Color::Red).add_attribute(Attribute::Bold),
                TaskPriority::Medium => text_cell.fg(Color::Yellow),
                TaskPriority::Low => text_cell.fg(Color::Green),
                TaskPriority::None => text_cell,
            }
        };
        row.add_cell(text_cell);

        let due_cell = match task.due_date {
            Some(due_date) => {
                let due_text = due_date.humanize();
                if !task.completed && due_date < Utc::now() {
                    Cell::new(due_text).fg(Color::Red) // Overdue
                } else {
                    Cell::new(due_text)
                }
            }
            None => Cell::new("-"),
        };
        row.add_cell(due_cell);

        row.add_cell(match &task.repeat {
            Some(badge) => Cell::new(badge).fg(Color::Cyan),
            None => Cell::new("-"),
        });
        row.add_cell(Cell::new(task.list_id.as_deref().unwrap_or("-")));
        table.add_row(row);
    }

    println!("{table}");
}
