//! In-memory task store.
//!
//! The store owns the task list and the id counter for one session. It is
//! created from whatever the task file held and handed back to the codec on
//! exit.

use crate::codec::DELIMITER;
use crate::error::{Result, TaskError};
use crate::fields::Priority;
use crate::task::{Task, MAX_TASK_ID};

/// Ordered collection of tasks plus id-assignment state.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl TaskStore {
    /// Build a store from previously persisted tasks, keeping their order.
    ///
    /// The id counter starts one past the largest id present, or at 1.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        TaskStore { tasks, next_id }
    }

    /// Append a new pending task and return its id.
    pub fn add(&mut self, description: &str, priority: Priority) -> Result<u64> {
        validate_description(description)?;
        let id = self.next_id;
        if id > MAX_TASK_ID {
            return Err(TaskError::IdsExhausted);
        }
        self.tasks.push(Task::new(id, description, priority));
        self.next_id = id + 1;
        tracing::debug!(id, %priority, "added task");
        Ok(id)
    }

    /// Get a task by ID.
    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    /// Tasks in store order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Mark a task as completed.
    pub fn complete(&mut self, id: u64) -> Result<()> {
        self.find_mut(id)?.completed = true;
        tracing::debug!(id, "completed task");
        Ok(())
    }

    /// Replace a task's description.
    pub fn edit_description(&mut self, id: u64, description: &str) -> Result<()> {
        validate_description(description)?;
        self.find_mut(id)?.description = description.to_string();
        tracing::debug!(id, "edited task description");
        Ok(())
    }

    /// Remove every task with this id and return how many were removed.
    pub fn delete(&mut self, id: u64) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = before - self.tasks.len();
        tracing::debug!(id, removed, "deleted task");
        removed
    }

    /// Tasks ordered by ascending priority, ties kept in store order.
    /// The store itself is left untouched.
    pub fn sort_by_priority(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by_key(|t| t.priority);
        sorted
    }

    /// The id the next added task will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

/// Reject descriptions the line format cannot round-trip.
fn validate_description(description: &str) -> Result<()> {
    if description.contains(DELIMITER) || description.contains(['\n', '\r']) {
        return Err(TaskError::InvalidDescription(description.to_string()));
    }
    Ok(())
}

/// Parse raw id input into a task id.
pub fn parse_task_id(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    match trimmed.parse::<u64>() {
        Ok(id) if (1..=MAX_TASK_ID).contains(&id) => Ok(id),
        _ => Err(TaskError::InvalidId(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(priorities: &[Priority]) -> TaskStore {
        let mut store = TaskStore::default();
        for (i, p) in priorities.iter().enumerate() {
            store.add(&format!("task {}", i + 1), *p).unwrap();
        }
        store
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        for n in [0usize, 1, 5] {
            let store = store_with(&vec![Priority::Low; n]);
            let ids: Vec<u64> = store.list().iter().map(|t| t.id).collect();
            assert_eq!(ids, (1..=n as u64).collect::<Vec<_>>());
            assert!(store.list().iter().all(|t| !t.completed));
            assert_eq!(store.next_id(), n as u64 + 1);
        }
    }

    #[test]
    fn test_add_allows_empty_description() {
        let mut store = TaskStore::default();
        let id = store.add("", Priority::High).unwrap();
        assert_eq!(store.find(id).unwrap().description, "");
    }

    #[test]
    fn test_add_rejects_delimiter_without_mutation() {
        let mut store = TaskStore::default();
        let err = store.add("eggs, milk", Priority::Low).unwrap_err();
        assert_eq!(err, TaskError::InvalidDescription("eggs, milk".into()));
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
        assert!(store.add("line\nbreak", Priority::Low).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_missing_is_none() {
        let store = store_with(&[Priority::Low]);
        assert!(store.find(1).is_some());
        assert!(store.find(2).is_none());
    }

    #[test]
    fn test_complete_only_touches_target() {
        let mut store = store_with(&[Priority::Low, Priority::High, Priority::Medium]);
        let before: Vec<Task> = store.list().to_vec();
        store.complete(2).unwrap();
        let after = store.list();
        assert!(after[1].completed);
        assert_eq!(after[1].description, before[1].description);
        assert_eq!(after[1].priority, before[1].priority);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn test_complete_missing_mutates_nothing() {
        let mut store = store_with(&[Priority::Low, Priority::High]);
        let before: Vec<Task> = store.list().to_vec();
        assert_eq!(store.complete(9), Err(TaskError::NotFound(9)));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_edit_description_only_changes_description() {
        let mut store = store_with(&[Priority::Medium, Priority::Low]);
        store.complete(1).unwrap();
        store.edit_description(1, "renamed").unwrap();
        let task = store.find(1).unwrap();
        assert_eq!(task.description, "renamed");
        assert!(task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(store.find(2).unwrap().description, "task 2");
    }

    #[test]
    fn test_edit_description_errors() {
        let mut store = store_with(&[Priority::Medium]);
        assert_eq!(store.edit_description(5, "x"), Err(TaskError::NotFound(5)));
        assert!(matches!(
            store.edit_description(1, "a,b"),
            Err(TaskError::InvalidDescription(_))
        ));
        assert_eq!(store.find(1).unwrap().description, "task 1");
    }

    #[test]
    fn test_delete_preserves_remaining_order() {
        let mut store = store_with(&[Priority::Low, Priority::Low, Priority::Low, Priority::Low]);
        assert_eq!(store.delete(2), 1);
        let ids: Vec<u64> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(store.delete(2), 0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = store_with(&[Priority::Low, Priority::Low]);
        store.delete(2);
        assert_eq!(store.add("again", Priority::Low).unwrap(), 3);
    }

    #[test]
    fn test_sort_by_priority_is_stable_and_view_only() {
        let store = store_with(&[Priority::High, Priority::Low, Priority::Medium, Priority::Low]);
        let sorted: Vec<(u64, Priority)> = store
            .sort_by_priority()
            .iter()
            .map(|t| (t.id, t.priority))
            .collect();
        assert_eq!(
            sorted,
            vec![
                (2, Priority::Low),
                (4, Priority::Low),
                (3, Priority::Medium),
                (1, Priority::High),
            ]
        );
        let ids: Vec<u64> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_from_tasks_sets_next_id_past_max() {
        let tasks = [3, 7, 2]
            .iter()
            .map(|&id| Task::new(id, "loaded", Priority::Low))
            .collect();
        let mut store = TaskStore::from_tasks(tasks);
        assert_eq!(store.add("new", Priority::High).unwrap(), 8);

        let empty = TaskStore::from_tasks(Vec::new());
        assert_eq!(empty.next_id(), 1);
    }

    #[test]
    fn test_largest_loaded_id_leaves_room_for_one_more() {
        let tasks = vec![Task::new(MAX_TASK_ID - 1, "near the end", Priority::Low)];
        let mut store = TaskStore::from_tasks(tasks);
        assert_eq!(store.add("last", Priority::Low).unwrap(), MAX_TASK_ID);
        assert_eq!(store.next_id(), MAX_TASK_ID + 1);

        assert_eq!(store.add("one too many", Priority::Low), Err(TaskError::IdsExhausted));
        assert_eq!(store.len(), 2);
        assert_eq!(store.next_id(), MAX_TASK_ID + 1);
    }

    #[test]
    fn test_from_tasks_never_wraps() {
        let tasks = vec![Task::new(u64::MAX, "corrupt", Priority::Low)];
        let mut store = TaskStore::from_tasks(tasks);
        assert_eq!(store.next_id(), u64::MAX);
        assert_eq!(store.add("x", Priority::Low), Err(TaskError::IdsExhausted));
    }

    #[test]
    fn test_completed_count() {
        let mut store = store_with(&[Priority::Low, Priority::Low, Priority::High]);
        store.complete(1).unwrap();
        store.complete(3).unwrap();
        assert_eq!(store.completed_count(), 2);
    }

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("12"), Ok(12));
        assert_eq!(parse_task_id(" 3 "), Ok(3));
        assert_eq!(parse_task_id("0"), Err(TaskError::InvalidId("0".into())));
        assert_eq!(parse_task_id("abc"), Err(TaskError::InvalidId("abc".into())));
        assert!(parse_task_id("-4").is_err());
        assert_eq!(parse_task_id(&MAX_TASK_ID.to_string()), Ok(MAX_TASK_ID));
        assert!(parse_task_id(&(MAX_TASK_ID + 1).to_string()).is_err());
        assert!(parse_task_id("").is_err());
    }
}
