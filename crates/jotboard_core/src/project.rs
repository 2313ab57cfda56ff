//! View/filter projection over the entity collections.
//!
//! # Responsibility
//! - Compute the display subset for the current filter/search state without
//!   mutating the underlying collection.
//!
//! # Invariants
//! - Projection preserves the collection's relative order.
//! - Task filtering is a discrete category plus a text query; post
//!   filtering is free text only. The two are intentionally distinct and
//!   must not be unified.

use crate::model::post::Post;
use crate::model::task::Task;

/// Discrete task filter categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Parses a filter name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Projects the task subset for `filter` and a free-text `query`.
///
/// A task is kept when it passes the category filter and, for a non-blank
/// query, its text contains the query case-insensitively.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: TaskFilter, query: &str) -> Vec<&'a Task> {
    let needle = query.trim().to_lowercase();
    tasks
        .iter()
        .filter(|task| match filter {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.completed,
            TaskFilter::Completed => task.completed,
        })
        .filter(|task| needle.is_empty() || task.text.to_lowercase().contains(&needle))
        .collect()
}

/// Projects the post subset matching a free-text `query`.
///
/// A post is kept when the query is blank or matches title, content, or
/// any tag case-insensitively.
pub fn search_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts.iter().collect();
    }

    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.content.to_lowercase().contains(&needle)
                || post.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}
