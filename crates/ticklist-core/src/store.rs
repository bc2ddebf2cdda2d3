use tracing::debug;

use crate::error::StoreError;
use crate::task::{Task, TaskId, TaskText};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: TaskId,
    pub task: Task,
}

/// Ordered in-memory task list. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    entries: Vec<Entry>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let entries = tasks
            .into_iter()
            .map(|task| Entry {
                id: TaskId::new(),
                task,
            })
            .collect();
        Self { entries }
    }

    #[tracing::instrument(skip(self, raw))]
    pub fn add(&mut self, raw: &str) -> Result<TaskId, StoreError> {
        let text = TaskText::parse(raw)?;
        let id = TaskId::new();
        self.entries.push(Entry {
            id,
            task: Task::new(text),
        });
        debug!(%id, count = self.entries.len(), "added task");
        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn delete(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let idx = self.position(id).ok_or(StoreError::UnknownTask(id))?;
        let removed = self.entries.remove(idx);
        debug!(index = idx, count = self.entries.len(), "deleted task");
        Ok(removed.task)
    }

    #[tracing::instrument(skip(self, raw), fields(id = %id))]
    pub fn set_text(&mut self, id: TaskId, raw: &str) -> Result<(), StoreError> {
        let text = TaskText::parse(raw)?;
        let entry = self.entry_mut(id)?;
        entry.task.text = text.into_inner();
        debug!("updated task text");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn toggle_completed(&mut self, id: TaskId) -> Result<bool, StoreError> {
        let entry = self.entry_mut(id)?;
        entry.task.completed = !entry.task.completed;
        debug!(completed = entry.task.completed, "toggled task");
        Ok(entry.task.completed)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.task)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot in display order, the shape that gets persisted.
    pub fn tasks(&self) -> Vec<Task> {
        self.entries.iter().map(|entry| entry.task.clone()).collect()
    }

    fn entry_mut(&mut self, id: TaskId) -> Result<&mut Entry, StoreError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(StoreError::UnknownTask(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(store: &TaskStore) -> Vec<String> {
        store.iter().map(|entry| entry.task.text.clone()).collect()
    }

    #[test]
    fn add_appends_trimmed_pending_task() {
        let mut store = TaskStore::new();
        let id = store.add("  Buy milk  ").expect("add");

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(id),
            Some(&Task {
                text: "Buy milk".to_string(),
                completed: false,
            })
        );
    }

    #[test]
    fn add_rejects_blank_without_mutating() {
        let mut store = TaskStore::new();
        assert_eq!(store.add(" \t "), Err(StoreError::BlankText));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_shifts_later_positions_down() {
        let mut store = TaskStore::new();
        let a = store.add("A").expect("add");
        let b = store.add("B").expect("add");
        let c = store.add("C").expect("add");

        store.delete(b).expect("delete B");
        assert_eq!(texts(&store), vec!["A", "C"]);
        assert_eq!(store.position(c), Some(1));

        store.delete(a).expect("delete A");
        assert_eq!(texts(&store), vec!["C"]);
        assert_eq!(store.position(c), Some(0));
    }

    #[test]
    fn set_text_keeps_previous_text_on_blank() {
        let mut store = TaskStore::new();
        let id = store.add("X").expect("add");

        assert_eq!(store.set_text(id, "   "), Err(StoreError::BlankText));
        assert_eq!(store.get(id).map(|t| t.text.as_str()), Some("X"));

        store.set_text(id, " Y ").expect("set text");
        assert_eq!(store.get(id).map(|t| t.text.as_str()), Some("Y"));
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut store = TaskStore::new();
        let id = store.add("A").expect("add");

        assert_eq!(store.toggle_completed(id), Ok(true));
        assert_eq!(store.toggle_completed(id), Ok(false));
    }

    #[test]
    fn unknown_ids_fail_loudly() {
        let mut store = TaskStore::new();
        store.add("A").expect("add");
        let stale = TaskId::new();

        assert_eq!(store.delete(stale), Err(StoreError::UnknownTask(stale)));
        assert_eq!(
            store.toggle_completed(stale),
            Err(StoreError::UnknownTask(stale))
        );
        assert_eq!(
            store.set_text(stale, "B"),
            Err(StoreError::UnknownTask(stale))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn from_tasks_preserves_order() {
        let tasks = vec![
            Task {
                text: "first".to_string(),
                completed: true,
            },
            Task {
                text: "second".to_string(),
                completed: false,
            },
        ];
        let store = TaskStore::from_tasks(tasks.clone());
        assert_eq!(store.tasks(), tasks);
    }
}
