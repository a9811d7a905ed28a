use anyhow::{anyhow, Result};
use redo_core::error::CoreError;
use redo_core::repository::TaskRepository;
use uuid::Uuid;

const MIN_PREFIX_LEN: usize = 2;
const SHORT_ID_LEN: usize = 8;

/// The abbreviated form of an ID shown in listings
pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..SHORT_ID_LEN].to_string()
}

/// Resolve a full task ID, or an abbreviated one as shown by `redo list`
pub async fn resolve_task_id(repo: &impl TaskRepository, input: &str) -> Result<Uuid> {
    let input = input.trim();

    if let Ok(id) = Uuid::parse_str(input) {
        return match repo.find_task_by_id(id).await? {
            Some(task) => Ok(task.id),
            None => Err(anyhow!(CoreError::NotFound(format!("No task with ID '{}'", id)))),
        };
    }

    if input.len() < MIN_PREFIX_LEN {
        return Err(anyhow!(CoreError::InvalidInput(format!(
            "Short ID must be at least {} characters long.",
            MIN_PREFIX_LEN
        ))));
    }

    let mut tasks = repo.find_tasks_by_short_id_prefix(input).await?;
    match tasks.len() {
        0 => Err(anyhow!(CoreError::NotFound(format!(
            "No task found with ID prefix '{}'",
            input
        )))),
        1 => Ok(tasks.remove(0).id),
        _ => {
            let candidates = tasks
                .into_iter()
                .map(|t| (t.id.to_string(), t.text))
                .collect();
            Err(anyhow!(CoreError::AmbiguousId(candidates)))
        }
    }
}
