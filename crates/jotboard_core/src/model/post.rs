//! Post record for the blog manager.
//!
//! # Responsibility
//! - Define the post shape persisted under the `blog-posts` key.
//! - Derive the excerpt projection and parse comma-separated tag input.
//!
//! # Invariants
//! - `id` is stable and never reused for another post.
//! - `excerpt` is derived from content at create/update time, never on read.
//! - Tags keep their input order and are trimmed and non-empty.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a post record.
pub type PostId = Uuid;

/// Maximum excerpt length in characters, before the truncation marker.
pub const EXCERPT_MAX_CHARS: usize = 150;

static TAG_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid tag split regex"));

/// Canonical blog post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub created_at: i64,
}

impl Post {
    /// Creates a post with a generated stable id and a derived excerpt.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
        created_at: i64,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, content, tags, created_at)
    }

    /// Creates a post with a caller-provided stable id.
    pub fn with_id(
        id: PostId,
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
        created_at: i64,
    ) -> Self {
        let content = content.into();
        let excerpt = derive_excerpt(&content);
        Self {
            id,
            title: title.into(),
            content,
            tags,
            excerpt,
            created_at,
        }
    }
}

/// Derives the stored excerpt from post content.
///
/// Keeps the first [`EXCERPT_MAX_CHARS`] characters and appends a `...`
/// marker only when content was actually truncated.
pub fn derive_excerpt(content: &str) -> String {
    let total_chars = content.chars().count();
    let mut excerpt: String = content.chars().take(EXCERPT_MAX_CHARS).collect();
    if total_chars > EXCERPT_MAX_CHARS {
        excerpt.push_str("...");
    }
    excerpt
}

/// Parses comma-separated tag input into trimmed, non-empty tags.
///
/// Order is preserved and duplicates are kept; the blog manager treats tag
/// input as an ordered sequence, not a set.
pub fn parse_tags(input: &str) -> Vec<String> {
    TAG_SPLIT_RE
        .split(input.trim())
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
