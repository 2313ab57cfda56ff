use chrono::NaiveDate;
use jotboard_core::{
    KeyValueStorage, ManualClock, MemoryStorage, Notice, NoticeKind, Priority, StorageError,
    StorageResult, TaskFilter, TaskListView, TaskManager, TaskView, NOTICE_TTL_MS,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

const NOW_MS: i64 = 1_705_276_800_000;

#[derive(Default)]
struct Recorded {
    lists: Vec<TaskListView>,
    notices: Vec<Vec<Notice>>,
}

#[derive(Default, Clone)]
struct RecordingView {
    recorded: Rc<RefCell<Recorded>>,
}

impl RecordingView {
    fn last_list(&self) -> TaskListView {
        self.recorded
            .borrow()
            .lists
            .last()
            .expect("a list should have been rendered")
            .clone()
    }

    fn last_notices(&self) -> Vec<Notice> {
        self.recorded
            .borrow()
            .notices
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

impl TaskView for RecordingView {
    fn show_list(&mut self, view: &TaskListView) {
        self.recorded.borrow_mut().lists.push(view.clone());
    }

    fn show_notices(&mut self, notices: &[Notice]) {
        self.recorded.borrow_mut().notices.push(notices.to_vec());
    }
}

/// Storage whose writes always fail, for exercising the persistence
/// warning path.
struct BrokenStorage;

impl KeyValueStorage for BrokenStorage {
    fn read(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn write(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Backend("disk full".to_string()))
    }
}

fn manager_with(
    clock: Arc<ManualClock>,
) -> (TaskManager<MemoryStorage, RecordingView>, RecordingView) {
    let view = RecordingView::default();
    let manager = TaskManager::new(MemoryStorage::new(), clock, view.clone());
    (manager, view)
}

#[test]
fn scenario_add_toggle_clear() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let (mut manager, view) = manager_with(clock);

    let due = NaiveDate::from_ymd_opt(2024, 1, 1);
    assert!(manager.add("Buy milk", Priority::High, due));

    assert_eq!(manager.store().len(), 1);
    let task = &manager.store().tasks()[0];
    assert_eq!(task.text, "Buy milk");
    assert_eq!(task.priority, Priority::High);
    assert!(!task.completed);
    let id = task.id;

    assert!(manager.toggle(id));
    assert!(manager.store().get(id).expect("task exists").completed);

    assert_eq!(manager.clear_completed(), 1);
    assert!(manager.store().is_empty());

    let messages: Vec<String> = view
        .last_notices()
        .iter()
        .map(|n| n.message.clone())
        .collect();
    assert!(messages.contains(&"Cleared 1 completed task".to_string()));
}

#[test]
fn initial_construction_renders_empty_list() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let (_manager, view) = manager_with(clock);
    assert!(view.last_list().is_empty());
}

#[test]
fn rejected_add_reports_false_and_pushes_no_notice() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let (mut manager, view) = manager_with(clock);

    assert!(!manager.add("   ", Priority::Medium, None));
    assert!(manager.store().is_empty());
    assert!(view.last_notices().is_empty());
}

#[test]
fn deleting_unknown_id_is_silent() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let (mut manager, view) = manager_with(clock);
    manager.add("real task", Priority::Medium, None);
    let notices_before = view.last_notices().len();

    assert!(!manager.delete(uuid::Uuid::new_v4()));
    assert_eq!(manager.store().len(), 1);
    assert_eq!(view.last_notices().len(), notices_before);
}

#[test]
fn pending_filter_projects_open_tasks_in_order() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let (mut manager, view) = manager_with(clock);
    manager.add("oldest", Priority::Medium, None);
    manager.add("middle", Priority::Medium, None);
    manager.add("newest", Priority::Medium, None);
    let middle_id = manager.store().tasks()[1].id;
    manager.toggle(middle_id);

    manager.set_filter(TaskFilter::Pending);

    let rows = view.last_list().rows;
    let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["newest", "oldest"]);
    assert!(rows.iter().all(|row| !row.completed));
}

#[test]
fn search_narrows_the_rendered_list() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let (mut manager, view) = manager_with(clock);
    manager.add("Buy milk", Priority::Medium, None);
    manager.add("Walk dog", Priority::Medium, None);

    manager.search("MILK");

    let rows = view.last_list().rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text, "Buy milk");
}

#[test]
fn edit_replaces_text_and_notifies() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let (mut manager, view) = manager_with(clock);
    manager.add("tpyo", Priority::Medium, None);
    let id = manager.store().tasks()[0].id;

    assert!(manager.edit(id, "typo"));
    assert_eq!(manager.store().get(id).expect("task exists").text, "typo");
    assert!(view
        .last_notices()
        .iter()
        .any(|n| n.message == "Task updated" && n.kind == NoticeKind::Success));
}

#[test]
fn clear_with_nothing_completed_pushes_info_notice() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let (mut manager, view) = manager_with(clock);
    manager.add("still open", Priority::Medium, None);

    assert_eq!(manager.clear_completed(), 0);
    assert_eq!(manager.store().len(), 1);
    assert!(view
        .last_notices()
        .iter()
        .any(|n| n.kind == NoticeKind::Info && n.message == "No completed tasks to clear"));
}

#[test]
fn persist_failure_surfaces_danger_notice_and_keeps_memory_state() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let view = RecordingView::default();
    let mut manager = TaskManager::new(BrokenStorage, clock, view.clone());

    assert!(manager.add("unsaved", Priority::Medium, None));

    assert_eq!(manager.store().len(), 1);
    let notices = view.last_notices();
    assert!(notices
        .iter()
        .any(|n| n.kind == NoticeKind::Success && n.message == "Task added"));
    assert!(notices
        .iter()
        .any(|n| n.kind == NoticeKind::Danger && n.message.contains("disk full")));
}

#[test]
fn notices_expire_after_ttl_via_tick() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let (mut manager, view) = manager_with(clock.clone());

    manager.add("short lived", Priority::Medium, None);
    assert!(!view.last_notices().is_empty());

    clock.advance(NOTICE_TTL_MS + 1);
    manager.tick();
    assert!(view.last_notices().is_empty());
    assert!(manager.notices().is_empty());
}

#[test]
fn toggle_notice_reflects_resulting_state() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let (mut manager, view) = manager_with(clock.clone());
    manager.add("flip", Priority::Medium, None);
    let id = manager.store().tasks()[0].id;

    manager.toggle(id);
    assert!(view
        .last_notices()
        .iter()
        .any(|n| n.message == "Task completed"));

    clock.advance(NOTICE_TTL_MS + 1);
    manager.toggle(id);
    let messages: Vec<String> = view
        .last_notices()
        .iter()
        .map(|n| n.message.clone())
        .collect();
    assert_eq!(messages, vec!["Task reopened".to_string()]);
}
