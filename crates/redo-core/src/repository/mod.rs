use crate::error::CoreError;
use crate::migration::MigrationReport;
use crate::models::{CompletionResult, NewTaskData, Task};
use async_trait::async_trait;
use uuid::Uuid;

pub mod json;

pub use json::JsonRepository;

/// Tasks read from storage, with the outcome of migrating their patterns
#[derive(Debug, Clone, Default)]
pub struct LoadedTasks {
    pub tasks: Vec<Task>,
    pub report: MigrationReport,
}

/// Persistence for the task list.
///
/// Implementations run every stored pattern through the migration layer on
/// load, so callers only ever see canonical patterns.
#[async_trait]
pub trait TaskRepository {
    async fn find_tasks(&self) -> Result<Vec<Task>, CoreError>;
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError>;
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError>;
    /// Marks the task done and, for a repeating task, stores its next instance
    async fn complete_task(&self, id: Uuid) -> Result<CompletionResult, CoreError>;
    /// Rewrites storage in the canonical schema
    async fn migrate(&self) -> Result<MigrationReport, CoreError>;
}
