use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use super::{LoadedTasks, TaskRepository};
use crate::error::CoreError;
use crate::migration::{migrate, LegacyPattern, MigrationOutcome, MigrationReport};
use crate::models::{CompletionResult, NewTaskData, RecurrenceType, Task};
use crate::recurrence::build_next_instance;
use crate::timezone::now_in;

#[derive(Serialize)]
struct StoreDocument<'a> {
    tasks: &'a [Task],
}

/// Stores the whole task list as one JSON document: `{ "tasks": [...] }`.
///
/// A bare top-level array (the oldest layout) is also accepted on load.
/// Writes go to a sibling temp file that is then renamed over the original.
pub struct JsonRepository {
    path: PathBuf,
    timezone: Tz,
    // Serializes load-modify-save cycles within this process
    lock: Mutex<()>,
}

impl JsonRepository {
    pub fn new(path: impl Into<PathBuf>, timezone: Tz) -> Self {
        Self {
            path: path.into(),
            timezone,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }

    /// Reads and migrates every stored task.
    pub async fn load(&self) -> Result<LoadedTasks, CoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LoadedTasks::default()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(LoadedTasks::default());
        }

        let document: Value = serde_json::from_str(&raw)?;
        let entries = match document {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map.remove("tasks") {
                Some(Value::Array(entries)) => entries,
                None | Some(Value::Null) => Vec::new(),
                Some(_) => {
                    return Err(CoreError::InvalidInput(format!(
                        "'tasks' in {} is not a list",
                        self.path.display()
                    )))
                }
            },
            _ => {
                return Err(CoreError::InvalidInput(format!(
                    "{} does not contain a task list",
                    self.path.display()
                )))
            }
        };

        let mut loaded = LoadedTasks {
            tasks: Vec::with_capacity(entries.len()),
            report: MigrationReport::default(),
        };
        for entry in entries {
            let task = Self::load_task(entry, &mut loaded.report)?;
            loaded.tasks.push(task);
        }
        Ok(loaded)
    }

    fn load_task(mut entry: Value, report: &mut MigrationReport) -> Result<Task, CoreError> {
        let stored_pattern = entry
            .as_object_mut()
            .and_then(|map| map.remove("recurrence"))
            .unwrap_or(Value::Null);
        let mut task: Task = serde_json::from_value(entry)?;

        let outcome = migrate(LegacyPattern::from_value(&stored_pattern));
        report.record(task.id, &outcome);
        if matches!(outcome, MigrationOutcome::Dropped { .. }) {
            task.is_recurring = false;
        }
        task.recurrence = outcome.into_pattern();
        Ok(task)
    }

    pub async fn save(&self, tasks: &[Task]) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(&StoreDocument { tasks })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved task list");
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for JsonRepository {
    async fn find_tasks(&self) -> Result<Vec<Task>, CoreError> {
        Ok(self.load().await?.tasks)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        Ok(self.load().await?.tasks.into_iter().find(|t| t.id == id))
    }

    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError> {
        let prefix = short_id.to_lowercase();
        Ok(self
            .load()
            .await?
            .tasks
            .into_iter()
            .filter(|t| t.id.to_string().starts_with(&prefix))
            .collect())
    }

    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let text = data.text.trim();
        if text.is_empty() {
            return Err(CoreError::InvalidInput("Task text is required".to_string()));
        }

        let _guard = self.lock.lock().await;
        let mut tasks = self.load().await?.tasks;
        let is_recurring = data.recurrence.as_ref().is_some_and(|p| p.repeats());
        let task = Task {
            text: text.to_string(),
            due_date: data.due_date,
            priority: data.priority.unwrap_or_default(),
            list_id: data.list_id,
            recurrence: data.recurrence,
            is_recurring,
            reminders: data.reminders,
            ..Default::default()
        };
        tasks.push(task.clone());
        self.save(&tasks).await?;
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.load().await?.tasks;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(CoreError::NotFound(id.to_string()));
        }
        self.save(&tasks).await
    }

    async fn complete_task(&self, id: Uuid) -> Result<CompletionResult, CoreError> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.load().await?.tasks;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        if task.completed {
            return Err(CoreError::InvalidInput(format!(
                "Task '{}' is already completed",
                task.text
            )));
        }

        let now = now_in(&self.timezone);
        task.completed = true;
        task.completed_at = Some(now.with_timezone(&Utc));
        let completed = task.clone();

        let single = matches!(
            completed.recurrence.as_ref().map(|p| &p.kind),
            None | Some(RecurrenceType::Once)
        );
        let result = if single {
            CompletionResult::Single(completed)
        } else {
            match build_next_instance(&completed, &now) {
                Some(next) => {
                    tasks.push(next.clone());
                    CompletionResult::Recurring { completed, next }
                }
                None => CompletionResult::RecurrenceEnded(completed),
            }
        };

        self.save(&tasks).await?;
        Ok(result)
    }

    async fn migrate(&self) -> Result<MigrationReport, CoreError> {
        let _guard = self.lock.lock().await;
        let loaded = self.load().await?;
        self.save(&loaded.tasks).await?;
        info!(
            path = %self.path.display(),
            migrated = loaded.report.migrated,
            dropped = loaded.report.dropped.len(),
            passed_through = loaded.report.passed_through.len(),
            "rewrote task list in canonical form"
        );
        Ok(loaded.report)
    }
}
