use thiserror::Error;

use crate::task::TaskId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("task text is empty")]
    BlankText,

    #[error("no task with id {0}")]
    UnknownTask(TaskId),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read key {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write key {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("failed to encode tasks: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("no task with id {0}")]
    UnknownTask(TaskId),

    #[error("could not persist tasks: {0}")]
    Storage(#[from] StorageError),
}
