use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary task file
pub struct CliTestHarness {
    temp_dir: TempDir,
    data_file: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with an empty temporary data file location
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let data_file = temp_dir.path().join("tasks.json");

        Self {
            temp_dir,
            data_file,
        }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("redo").expect("Failed to find redo binary");

        // Run outside the repository so no stray redo.toml is picked up
        cmd.current_dir(self.temp_dir.path());
        cmd.env("REDO_DATA_FILE", &self.data_file);
        cmd.env("REDO_TIMEZONE", "UTC");
        cmd.env_remove("REDO_LOG");

        cmd
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Write raw JSON to the data file, e.g. a document from an older release
    pub fn seed(&self, document: &Value) {
        std::fs::write(&self.data_file, document.to_string()).expect("Failed to seed data file");
    }

    /// The stored task records, in storage order
    pub fn stored_tasks(&self) -> Vec<Value> {
        let raw = std::fs::read_to_string(&self.data_file).expect("Failed to read data file");
        let document: Value = serde_json::from_str(&raw).expect("Data file is not JSON");
        document["tasks"]
            .as_array()
            .cloned()
            .expect("Data file has no task list")
    }

    /// ID of the stored task at `index`
    pub fn task_id(&self, index: usize) -> String {
        self.stored_tasks()[index]["id"]
            .as_str()
            .expect("Task has no id")
            .to_string()
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check if output contains task table headers
    pub fn has_task_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Task"))
            .and(predicate::str::contains("Repeats"))
    }

    /// Predicate to check if output indicates successful task creation
    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("✓").and(
            predicate::str::contains("Created task")
                .or(predicate::str::contains("Created repeating task")),
        )
    }

    /// Predicate to check for empty result set
    pub fn empty_result() -> impl Predicate<str> {
        predicate::str::contains("No tasks found")
    }

    /// Predicate to check for error messages
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
