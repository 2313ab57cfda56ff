//! Todo manager command surface.
//!
//! # Responsibility
//! - Drive the task store from discrete commands, then re-project and
//!   re-render through the injected view.
//! - Map mutation outcomes to feed notices.
//!
//! # Invariants
//! - Lookup misses and validation failures produce no notice; the caller
//!   sees them only through the returned flag.
//! - Persistence failures surface as a danger notice while the in-memory
//!   collection stays authoritative.

use crate::clock::Clock;
use crate::manager::TaskView;
use crate::model::task::{Priority, TaskId};
use crate::notify::{NoticeFeed, NoticeKind};
use crate::project::{filter_tasks, TaskFilter};
use crate::storage::KeyValueStorage;
use crate::store::task_store::{TaskDraft, TaskPatch, TaskStore};
use crate::store::{ClearOutcome, Mutation, PersistStatus};
use crate::view::task_list_view;
use chrono::NaiveDate;
use std::sync::Arc;

/// Todo list manager with injected storage, clock, and view collaborators.
pub struct TaskManager<S: KeyValueStorage, V: TaskView> {
    store: TaskStore<S>,
    filter: TaskFilter,
    query: String,
    feed: NoticeFeed,
    clock: Arc<dyn Clock>,
    view: V,
}

impl<S: KeyValueStorage, V: TaskView> TaskManager<S, V> {
    /// Loads persisted tasks and renders the initial list.
    pub fn new(storage: S, clock: Arc<dyn Clock>, view: V) -> Self {
        let store = TaskStore::load(storage, clock.clone());
        let mut manager = Self {
            store,
            filter: TaskFilter::default(),
            query: String::new(),
            feed: NoticeFeed::new(),
            clock,
            view,
        };
        manager.refresh_list();
        manager
    }

    /// Adds a task; returns whether the input was accepted.
    pub fn add(
        &mut self,
        text: impl Into<String>,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> bool {
        let outcome = self.store.create(TaskDraft {
            text: text.into(),
            priority,
            due_date,
        });
        self.settle(outcome, "Task added")
    }

    /// Flips completion state of the matching task.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let outcome = self.store.toggle(id);
        let message = match outcome.record() {
            Some(task) if task.completed => "Task completed",
            Some(_) => "Task reopened",
            None => "",
        };
        self.settle(outcome, message)
    }

    /// Deletes the matching task.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let outcome = self.store.remove(id);
        self.settle(outcome, "Task deleted")
    }

    /// Replaces the text of the matching task.
    pub fn edit(&mut self, id: TaskId, new_text: impl Into<String>) -> bool {
        let outcome = self.store.update(
            id,
            TaskPatch {
                text: Some(new_text.into()),
                ..TaskPatch::default()
            },
        );
        self.settle(outcome, "Task updated")
    }

    /// Switches the category filter and re-renders.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
        self.refresh_list();
    }

    /// Updates the free-text search query and re-renders.
    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh_list();
    }

    /// Removes all completed tasks; returns how many were cleared.
    pub fn clear_completed(&mut self) -> usize {
        let now = self.clock.now_epoch_ms();
        self.feed.sweep(now);

        let count = match self.store.clear_completed() {
            ClearOutcome::Cleared { count, persist } => {
                let noun = if count == 1 { "task" } else { "tasks" };
                self.feed.push(
                    NoticeKind::Success,
                    format!("Cleared {count} completed {noun}"),
                    now,
                );
                self.report_persist(persist, now);
                count
            }
            ClearOutcome::NothingToClear => {
                self.feed
                    .push(NoticeKind::Info, "No completed tasks to clear", now);
                0
            }
        };

        self.refresh_list();
        self.view.show_notices(self.feed.active());
        count
    }

    /// Expires stale notices; the synchronous host calls this instead of
    /// running background timers.
    pub fn tick(&mut self) {
        let now = self.clock.now_epoch_ms();
        if self.feed.sweep(now) > 0 {
            self.view.show_notices(self.feed.active());
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn notices(&self) -> &[crate::notify::Notice] {
        self.feed.active()
    }

    fn settle(&mut self, outcome: Mutation<crate::model::task::Task>, message: &str) -> bool {
        let now = self.clock.now_epoch_ms();
        self.feed.sweep(now);

        let applied = match outcome {
            Mutation::Applied { persist, .. } => {
                self.feed.push(NoticeKind::Success, message, now);
                self.report_persist(persist, now);
                true
            }
            Mutation::Rejected => false,
            Mutation::Missing => false,
        };

        self.refresh_list();
        self.view.show_notices(self.feed.active());
        applied
    }

    fn report_persist(&mut self, persist: PersistStatus, now: i64) {
        if let PersistStatus::Failed(err) = persist {
            self.feed
                .push(NoticeKind::Danger, format!("Saving tasks failed: {err}"), now);
        }
    }

    fn refresh_list(&mut self) {
        let projected = filter_tasks(self.store.tasks(), self.filter, &self.query);
        let view_model = task_list_view(&projected);
        self.view.show_list(&view_model);
    }
}
