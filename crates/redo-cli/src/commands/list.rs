use anyhow::Result;
use redo_core::repository::TaskRepository;

use crate::cli::ListCommand;
use crate::views::table::{display_tasks, ViewTask};

pub async fn list_tasks(repo: &impl TaskRepository, command: ListCommand) -> Result<()> {
    let mut tasks = repo.find_tasks().await?;
    tasks.retain(|t| command.all || !t.completed);
    if let Some(list) = &command.list {
        tasks.retain(|t| t.list_id.as_deref() == Some(list.as_str()));
    }

    // Open tasks first, soonest due first, undated last
    tasks.sort_by_key(|t| (t.completed, t.due_date.is_none(), t.due_date, t.created_at));

    let view_tasks: Vec<ViewTask> = tasks.iter().map(ViewTask::from).collect();
    display_tasks(&view_tasks);
    Ok(())
}
