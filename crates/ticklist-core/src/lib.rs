pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod render;
pub mod storage;
pub mod store;
pub mod task;

pub use app::{Action, Dispatch, Outcome, Rejection, TodoApp};
pub use config::{Config, Labels};
pub use error::{AppError, StorageError, StoreError};
pub use form::{FormTransition, Visibility};
pub use render::{Render, RowMode, RowView, Rows};
pub use storage::{KeyValueStore, Loaded, MemoryStore, StorageAdapter};
pub use task::{Task, TaskId};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
