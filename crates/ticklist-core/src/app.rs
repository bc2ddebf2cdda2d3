use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{AppError, StoreError};
use crate::form::{FormController, FormTransition, Visibility};
use crate::render::{EditSessions, Render, Rows};
use crate::storage::{KeyValueStore, StorageAdapter};
use crate::store::TaskStore;
use crate::task::{Task, TaskId};

/// A user interaction, already resolved from the DOM event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add-trigger click or form cancel click.
    ToggleForm,
    Submit(String),
    ToggleCompleted(TaskId),
    Delete(TaskId),
    BeginEdit(TaskId),
    SaveEdit { id: TaskId, text: String },
    CancelEdit(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    BlankText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

/// Everything the view needs to do in response to one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub outcome: Outcome,
    pub render: Render,
    pub form: Option<FormTransition>,
    pub clear_input: bool,
}

impl Dispatch {
    fn applied(render: Render) -> Self {
        Self {
            outcome: Outcome::Applied,
            render,
            form: None,
            clear_input: false,
        }
    }

    fn rejected(reason: Rejection) -> Self {
        Self {
            outcome: Outcome::Rejected(reason),
            render: Render::Nothing,
            form: None,
            clear_input: false,
        }
    }
}

enum Committed<T> {
    Done(T),
    Rejected(Rejection),
}

/// Owns the session state and routes actions to it.
#[derive(Debug)]
pub struct TodoApp<S> {
    store: TaskStore,
    storage: StorageAdapter<S>,
    form: FormController,
    sessions: EditSessions,
    discarded: Option<String>,
    /// Memory holds changes storage has not accepted yet.
    dirty: bool,
}

impl<S: KeyValueStore> TodoApp<S> {
    #[tracing::instrument(skip_all, fields(key = %config.storage_key))]
    pub fn open(kv: S, config: &Config) -> Self {
        let storage = StorageAdapter::new(kv, config.storage_key.clone());
        let loaded = storage.load();
        info!(count = loaded.tasks.len(), "opened task list");
        Self {
            store: TaskStore::from_tasks(loaded.tasks),
            storage,
            form: FormController::new(),
            sessions: EditSessions::default(),
            discarded: loaded.discarded,
            dirty: false,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn dispatch(&mut self, action: Action) -> Result<Dispatch, AppError> {
        match action {
            Action::ToggleForm => Ok(Dispatch {
                form: Some(self.form.toggle()),
                ..Dispatch::applied(Render::Nothing)
            }),
            Action::Submit(text) => match self.commit(|store| store.add(&text))? {
                Committed::Done(_) => {
                    let form = self
                        .form
                        .visibility()
                        .is_visible()
                        .then(|| self.form.toggle());
                    self.sessions.clear();
                    Ok(Dispatch {
                        form,
                        clear_input: true,
                        ..Dispatch::applied(Render::All)
                    })
                }
                Committed::Rejected(reason) => Ok(Dispatch::rejected(reason)),
            },
            Action::ToggleCompleted(id) => {
                self.commit(|store| store.toggle_completed(id))?;
                self.sessions.clear();
                Ok(Dispatch::applied(Render::All))
            }
            Action::Delete(id) => {
                self.commit(|store| store.delete(id))?;
                self.sessions.clear();
                Ok(Dispatch::applied(Render::All))
            }
            Action::BeginEdit(id) => {
                self.require(id)?;
                self.sessions.begin(id);
                debug!(%id, "entered edit mode");
                Ok(Dispatch::applied(Render::Row(id)))
            }
            Action::SaveEdit { id, text } => {
                match self.commit(|store| store.set_text(id, &text))? {
                    Committed::Done(()) => {
                        self.sessions.end(id);
                        Ok(Dispatch::applied(Render::Row(id)))
                    }
                    Committed::Rejected(reason) => Ok(Dispatch::rejected(reason)),
                }
            }
            Action::CancelEdit(id) => {
                self.require(id)?;
                self.sessions.end(id);
                debug!(%id, "cancelled edit");
                Ok(Dispatch::applied(Render::Row(id)))
            }
        }
    }

    /// Writes the current list if it has unsaved changes. A stored value
    /// discarded at startup is left alone until the user changes something.
    #[tracing::instrument(skip(self))]
    pub fn flush(&mut self) -> Result<(), AppError> {
        if !self.dirty {
            debug!("nothing to flush");
            return Ok(());
        }
        self.storage.save(&self.store.tasks())?;
        self.dirty = false;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn rows(&self) -> Rows {
        Rows::render_all(&self.store, &self.sessions)
    }

    pub fn refresh(&self, rows: &mut Rows, render: Render) {
        rows.apply(render, &self.store, &self.sessions);
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.store.tasks()
    }

    pub fn storage(&self) -> &StorageAdapter<S> {
        &self.storage
    }

    pub fn form_visibility(&self) -> Visibility {
        self.form.visibility()
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.sessions.is_editing(id)
    }

    /// Reason the stored list was thrown away at startup, if it was.
    pub fn discarded(&self) -> Option<&str> {
        self.discarded.as_deref()
    }

    fn require(&self, id: TaskId) -> Result<(), AppError> {
        match self.store.get(id) {
            Some(_) => Ok(()),
            None => Err(AppError::UnknownTask(id)),
        }
    }

    /// Applies `mutate` and persists. A failed write restores the previous
    /// list so memory and storage never diverge.
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut TaskStore) -> Result<T, StoreError>,
    ) -> Result<Committed<T>, AppError> {
        let before = self.store.clone();
        let value = match mutate(&mut self.store) {
            Ok(value) => value,
            Err(StoreError::BlankText) => {
                debug!("rejected blank text");
                return Ok(Committed::Rejected(Rejection::BlankText));
            }
            Err(StoreError::UnknownTask(id)) => {
                warn!(%id, "action referenced an unknown task");
                return Err(AppError::UnknownTask(id));
            }
        };

        self.dirty = true;
        if let Err(err) = self.storage.save(&self.store.tasks()) {
            error!(error = %err, "persist failed; rolling back");
            self.store = before;
            self.dirty = false;
            return Err(err.into());
        }
        self.dirty = false;
        Ok(Committed::Done(value))
    }
}
