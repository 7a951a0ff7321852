/// Task operations
use crate::domain::{DomainError, Task, TaskId};
use crate::storage::KeyValueStore;
use crate::store::{Applied, Store};

impl<K: KeyValueStore> Store<K> {
    /// Append a user task with the fixed defaults
    pub fn add_task(&mut self, text: String) -> Result<Applied<Task>, DomainError> {
        self.recover_stored_state();
        let task = Task::new(text)?;

        let mut next = self.state.clone();
        next.tasks.push(task.clone());

        tracing::debug!("Added task {}", task.id);
        Ok(self.commit(next, task))
    }

    /// Flip a task's `completed` flag
    ///
    /// Unknown ids are a no-op: nothing is written and `value` is `false`.
    pub fn toggle_task(&mut self, id: &TaskId) -> Applied<bool> {
        self.recover_stored_state();
        let Some(index) = self.state.tasks.iter().position(|t| &t.id == id) else {
            tracing::debug!("toggle_task: no task {}", id);
            return Applied::clean(false);
        };

        let mut next = self.state.clone();
        next.tasks[index] = next.tasks[index].toggled();

        tracing::debug!("Toggled task {} -> {}", id, next.tasks[index].completed);
        self.commit(next, true)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{TaskId, USER_TASK_ICON};
    use crate::store::tests::memory_store;

    #[test]
    fn test_add_task_appends() {
        let mut store = memory_store();
        let task = store.add_task("Write a letter".to_string()).unwrap().into_value();

        let last = store.state().tasks.last().unwrap();
        assert_eq!(last, &task);
        assert_eq!(last.icon, USER_TASK_ICON);
    }

    #[test]
    fn test_add_blank_task_changes_nothing() {
        let mut store = memory_store();
        let before = store.state().clone();
        assert!(store.add_task(" ".to_string()).is_err());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut store = memory_store();
        let id = store.state().tasks[0].id.clone();

        assert!(store.toggle_task(&id).value);
        assert!(store.state().tasks[0].completed);
        assert!(store.toggle_task(&id).value);
        assert!(!store.state().tasks[0].completed);
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let mut store = memory_store();
        let before = store.state().clone();
        let mut rx = store.subscribe();

        let applied = store.toggle_task(&TaskId::from("missing"));
        assert!(!applied.value);
        assert!(applied.is_durable());
        assert_eq!(store.state(), &before);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_snapshots_are_not_aliased() {
        let mut store = memory_store();
        let earlier = store.state().clone();
        let id = earlier.tasks[1].id.clone();

        let _ = store.toggle_task(&id);
        assert!(!earlier.tasks[1].completed);
        assert!(store.state().tasks[1].completed);
    }
}
