use std::collections::BTreeSet;

use tracing::{trace, warn};

use crate::store::{Entry, TaskStore};
use crate::task::TaskId;

/// Rows currently shown in edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSessions {
    open: BTreeSet<TaskId>,
}

impl EditSessions {
    pub fn begin(&mut self, id: TaskId) {
        self.open.insert(id);
    }

    pub fn end(&mut self, id: TaskId) -> bool {
        self.open.remove(&id)
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.open.contains(&id)
    }

    pub fn clear(&mut self) {
        self.open.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Display,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub mode: RowMode,
}

impl RowView {
    fn project(entry: &Entry, sessions: &EditSessions) -> Self {
        let mode = if sessions.is_editing(entry.id) {
            RowMode::Editing
        } else {
            RowMode::Display
        };
        Self {
            id: entry.id,
            text: entry.task.text.clone(),
            completed: entry.task.completed,
            mode,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode == RowMode::Editing
    }
}

/// What the view has to redraw after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    Nothing,
    All,
    Row(TaskId),
}

/// Displayed rows, one per task in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rows {
    rows: Vec<RowView>,
}

impl Rows {
    pub fn render_all(store: &TaskStore, sessions: &EditSessions) -> Self {
        let rows: Vec<RowView> = store
            .iter()
            .map(|entry| RowView::project(entry, sessions))
            .collect();
        trace!(count = rows.len(), "rendered all rows");
        Self { rows }
    }

    /// Rebuilds the row for `id` in place. Other rows are left untouched.
    pub fn render_one(&mut self, store: &TaskStore, sessions: &EditSessions, id: TaskId) -> bool {
        let Some(slot) = self.rows.iter_mut().find(|row| row.id == id) else {
            warn!(%id, "row to re-render is not displayed");
            return false;
        };
        let Some(entry) = store.iter().find(|entry| entry.id == id) else {
            warn!(%id, "row to re-render has no task");
            return false;
        };
        *slot = RowView::project(entry, sessions);
        trace!(%id, "rendered one row");
        true
    }

    pub fn apply(&mut self, render: Render, store: &TaskStore, sessions: &EditSessions) {
        match render {
            Render::Nothing => {}
            Render::All => *self = Self::render_all(store, sessions),
            Render::Row(id) => {
                if !self.render_one(store, sessions, id) {
                    *self = Self::render_all(store, sessions);
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowView> {
        self.rows.iter()
    }

    pub fn get(&self, id: TaskId) -> Option<&RowView> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_all_follows_store_order() {
        let mut store = TaskStore::new();
        store.add("A").expect("add");
        let b = store.add("B").expect("add");
        store.toggle_completed(b).expect("toggle");

        let rows = Rows::render_all(&store, &EditSessions::default());
        let texts: Vec<&str> = rows.iter().map(|row| row.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B"]);
        assert!(rows.get(b).is_some_and(|row| row.completed));
        assert!(rows.iter().all(|row| row.mode == RowMode::Display));
    }

    #[test]
    fn render_one_only_touches_its_row() {
        let mut store = TaskStore::new();
        let a = store.add("A").expect("add");
        let b = store.add("B").expect("add");
        let mut sessions = EditSessions::default();
        let mut rows = Rows::render_all(&store, &sessions);

        // A pending edit on A that is not yet reflected in the rows.
        sessions.begin(a);
        store.set_text(b, "B2").expect("set text");
        assert!(rows.render_one(&store, &sessions, b));

        assert_eq!(rows.get(b).map(|row| row.text.as_str()), Some("B2"));
        assert_eq!(rows.get(a).map(|row| row.mode), Some(RowMode::Display));
    }

    #[test]
    fn render_one_reports_missing_rows() {
        let store = TaskStore::new();
        let mut rows = Rows::default();
        assert!(!rows.render_one(&store, &EditSessions::default(), TaskId::new()));
    }

    #[test]
    fn editing_rows_project_edit_mode() {
        let mut store = TaskStore::new();
        let a = store.add("A").expect("add");
        let mut sessions = EditSessions::default();
        sessions.begin(a);

        let rows = Rows::render_all(&store, &sessions);
        assert!(rows.get(a).is_some_and(RowView::is_editing));
    }
}
