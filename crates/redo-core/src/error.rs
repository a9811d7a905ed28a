use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Storage format error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ambiguous short ID. Did you mean one of these?")]
    AmbiguousId(Vec<(String, String)>), // Vec of (ID, text)

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}
