//! Core domain logic for JotBoard.
//! This crate is the single source of truth for board business invariants.

pub mod clock;
pub mod logging;
pub mod manager;
pub mod model;
pub mod notify;
pub mod project;
pub mod render;
pub mod storage;
pub mod store;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use manager::post_manager::{PostForm, PostManager, Screen};
pub use manager::task_manager::TaskManager;
pub use manager::{BlogView, TaskView};
pub use model::post::{derive_excerpt, parse_tags, Post, PostId, EXCERPT_MAX_CHARS};
pub use model::task::{Priority, Task, TaskId};
pub use notify::{Notice, NoticeFeed, NoticeKind, NOTICE_TTL_MS};
pub use project::{filter_tasks, search_posts, TaskFilter};
pub use storage::{
    KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult,
};
pub use store::post_store::{PostDraft, PostPatch, PostStore, POSTS_KEY};
pub use store::task_store::{TaskDraft, TaskPatch, TaskStore, TASKS_KEY};
pub use store::{ChangeObserver, ClearOutcome, Mutation, PersistStatus, StoreChange};
pub use view::{
    format_created_label, post_card, post_detail_view, post_form_view, post_list_view,
    tags_input_value, task_list_view, task_row, FormMode, PostCardView, PostDetailView,
    PostFormView, PostListView, TaskListView, TaskRowView,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
