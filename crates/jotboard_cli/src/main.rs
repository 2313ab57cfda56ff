//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable that wires `jotboard_core` end-to-end.
//! - Keep output deterministic enough for quick local sanity checks.

use jotboard_core::render::html;
use jotboard_core::{
    MemoryStorage, Notice, Priority, SystemClock, TaskListView, TaskManager, TaskView,
};
use std::sync::Arc;

struct StdoutTaskView;

impl TaskView for StdoutTaskView {
    fn show_list(&mut self, view: &TaskListView) {
        println!("{}", html::task_list_markup(view));
    }

    fn show_notices(&mut self, notices: &[Notice]) {
        for notice in notices {
            println!("[{}] {}", notice.kind.as_str(), notice.message);
        }
    }
}

fn main() {
    println!("jotboard_core version={}", jotboard_core::core_version());

    let clock = Arc::new(SystemClock);
    let mut board = TaskManager::new(MemoryStorage::new(), clock, StdoutTaskView);

    board.add("Try jotboard", Priority::High, None);
    board.add("Read the module docs", Priority::Medium, None);
    board.clear_completed();
}
