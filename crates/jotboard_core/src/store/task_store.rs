//! Task store and mutation API for the todo manager.
//!
//! # Responsibility
//! - Own the ordered task collection persisted under the `todos` key.
//! - Apply create/update/toggle/remove/clear-completed mutations with the
//!   shared outcome taxonomy.
//!
//! # Invariants
//! - New tasks are inserted at the head; most-recent-first is the canonical
//!   order and nothing else sorts the collection.
//! - `id` and `created_at` survive every update.
//! - Every applied mutation persists the whole collection and notifies
//!   observers; rejected and missing outcomes do neither.

use crate::clock::Clock;
use crate::model::task::{Priority, Task, TaskId};
use crate::storage::KeyValueStorage;
use crate::store::{
    load_collection, persist_collection, ChangeObserver, ClearOutcome, Mutation, PersistStatus,
    StoreChange,
};
use chrono::NaiveDate;
use log::{debug, info};
use std::sync::Arc;

/// Fixed storage key for the task collection.
pub const TASKS_KEY: &str = "todos";

const MODULE: &str = "task_store";

/// Input for creating one task.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub text: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Draft with default priority and no due date.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: Priority::default(),
            due_date: None,
        }
    }
}

/// Partial update for one task; only provided fields are replaced.
///
/// `due_date` is doubly optional: `None` leaves the field alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
}

/// Authoritative task collection mirrored to key-value storage.
pub struct TaskStore<S: KeyValueStorage> {
    storage: S,
    clock: Arc<dyn Clock>,
    tasks: Vec<Task>,
    observers: Vec<Box<dyn ChangeObserver>>,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Loads the persisted collection, falling back to empty on any read or
    /// decode failure.
    pub fn load(storage: S, clock: Arc<dyn Clock>) -> Self {
        let tasks: Vec<Task> = load_collection(&storage, TASKS_KEY, MODULE);
        info!(
            "event=store_load module={MODULE} status=ok key={TASKS_KEY} count={}",
            tasks.len()
        );
        Self {
            storage,
            clock,
            tasks,
            observers: Vec::new(),
        }
    }

    /// Registers a change observer notified after each applied mutation.
    pub fn subscribe(&mut self, observer: Box<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Creates a task at the head of the collection.
    ///
    /// Empty or whitespace-only text is rejected silently per the
    /// validation contract.
    pub fn create(&mut self, draft: TaskDraft) -> Mutation<Task> {
        let text = draft.text.trim();
        if text.is_empty() {
            debug!("event=task_create module={MODULE} status=rejected reason=empty_text");
            return Mutation::Rejected;
        }

        let task = Task::new(
            text,
            draft.priority,
            draft.due_date,
            self.clock.now_epoch_ms(),
        );
        self.tasks.insert(0, task.clone());
        let persist = self.persist();
        self.notify(StoreChange::Created(task.id));
        debug!("event=task_create module={MODULE} status=ok id={}", task.id);
        Mutation::Applied {
            record: task,
            persist,
        }
    }

    /// Replaces only the fields provided in `patch`, keeping `id` and
    /// `created_at` untouched.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> Mutation<Task> {
        if let Some(text) = patch.text.as_deref() {
            if text.trim().is_empty() {
                debug!("event=task_update module={MODULE} status=rejected reason=empty_text");
                return Mutation::Rejected;
            }
        }

        let Some(index) = self.position(id) else {
            return Mutation::Missing;
        };

        let record = {
            let task = &mut self.tasks[index];
            if let Some(text) = patch.text {
                task.text = text.trim().to_string();
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = due_date;
            }
            task.clone()
        };

        let persist = self.persist();
        self.notify(StoreChange::Updated(id));
        Mutation::Applied { record, persist }
    }

    /// Flips the completed flag of the matching task.
    pub fn toggle(&mut self, id: TaskId) -> Mutation<Task> {
        let Some(index) = self.position(id) else {
            return Mutation::Missing;
        };

        let record = {
            let task = &mut self.tasks[index];
            task.completed = !task.completed;
            task.clone()
        };

        let persist = self.persist();
        self.notify(StoreChange::Toggled(id));
        Mutation::Applied { record, persist }
    }

    /// Removes the matching task; returns the removed record.
    pub fn remove(&mut self, id: TaskId) -> Mutation<Task> {
        let Some(index) = self.position(id) else {
            return Mutation::Missing;
        };

        let record = self.tasks.remove(index);
        let persist = self.persist();
        self.notify(StoreChange::Removed(id));
        debug!("event=task_remove module={MODULE} status=ok id={id}");
        Mutation::Applied { record, persist }
    }

    /// Removes every completed task in one pass.
    pub fn clear_completed(&mut self) -> ClearOutcome {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let count = before - self.tasks.len();
        if count == 0 {
            return ClearOutcome::NothingToClear;
        }

        let persist = self.persist();
        self.notify(StoreChange::Cleared(count));
        info!("event=task_clear_completed module={MODULE} status=ok count={count}");
        ClearOutcome::Cleared { count, persist }
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn persist(&mut self) -> PersistStatus {
        persist_collection(&mut self.storage, TASKS_KEY, &self.tasks, MODULE)
    }

    fn notify(&self, change: StoreChange) {
        for observer in &self.observers {
            observer.on_change(&change);
        }
    }
}
