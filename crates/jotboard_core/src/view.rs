//! Structured view models for projected records.
//!
//! # Responsibility
//! - Map records into plain display projections, decoupling the record
//!   shape from any concrete rendering technology.
//! - Format timestamps and due dates into display labels.
//!
//! # Invariants
//! - View models own their data; they hold no borrows into the store.
//! - Mapping never mutates records and is deterministic for equal input.

use crate::model::post::Post;
use crate::model::task::{Priority, Task};
use chrono::{NaiveDate, TimeZone, Utc};

/// One task row ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowView {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_label: Option<String>,
    pub created_label: String,
}

/// Projected task subset ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub rows: Vec<TaskRowView>,
}

impl TaskListView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One post card in the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCardView {
    pub id: String,
    pub title: String,
    pub created_label: String,
    pub tags: Vec<String>,
    pub excerpt: String,
}

/// Projected post subset plus the active query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListView {
    pub cards: Vec<PostCardView>,
    pub query: String,
}

impl PostListView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Full post ready for the read view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetailView {
    pub id: String,
    pub title: String,
    pub created_label: String,
    pub tags: Vec<String>,
    pub content: String,
}

/// Whether the post form creates a new post or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// Post form fields ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFormView {
    pub mode: FormMode,
    pub title: String,
    pub content: String,
    pub tags_input: String,
}

/// Maps one task to its display row.
pub fn task_row(task: &Task) -> TaskRowView {
    TaskRowView {
        id: task.id.to_string(),
        text: task.text.clone(),
        completed: task.completed,
        priority: task.priority,
        due_label: task.due_date.map(format_date_label),
        created_label: format_created_label(task.created_at),
    }
}

/// Maps a projected task subset to its list view.
pub fn task_list_view(tasks: &[&Task]) -> TaskListView {
    TaskListView {
        rows: tasks.iter().map(|task| task_row(task)).collect(),
    }
}

/// Maps one post to its list card.
pub fn post_card(post: &Post) -> PostCardView {
    PostCardView {
        id: post.id.to_string(),
        title: post.title.clone(),
        created_label: format_created_label(post.created_at),
        tags: post.tags.clone(),
        excerpt: post.excerpt.clone(),
    }
}

/// Maps a projected post subset and its query to the list view.
pub fn post_list_view(posts: &[&Post], query: &str) -> PostListView {
    PostListView {
        cards: posts.iter().map(|post| post_card(post)).collect(),
        query: query.to_string(),
    }
}

/// Maps one post to the full read view.
pub fn post_detail_view(post: &Post) -> PostDetailView {
    PostDetailView {
        id: post.id.to_string(),
        title: post.title.clone(),
        created_label: format_created_label(post.created_at),
        tags: post.tags.clone(),
        content: post.content.clone(),
    }
}

/// Builds the form view for creating or editing a post.
pub fn post_form_view(
    mode: FormMode,
    title: &str,
    content: &str,
    tags_input: &str,
) -> PostFormView {
    PostFormView {
        mode,
        title: title.to_string(),
        content: content.to_string(),
        tags_input: tags_input.to_string(),
    }
}

/// Joins tags back into the comma-separated form the tag input expects.
pub fn tags_input_value(tags: &[String]) -> String {
    tags.join(", ")
}

/// Formats an epoch-millisecond creation stamp as a short date label.
///
/// Out-of-range stamps yield an empty label instead of failing the render.
pub fn format_created_label(epoch_ms: i64) -> String {
    Utc.timestamp_millis_opt(epoch_ms)
        .single()
        .map(|instant| instant.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

fn format_date_label(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
