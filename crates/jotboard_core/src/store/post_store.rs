//! Post store and mutation API for the blog manager.
//!
//! # Responsibility
//! - Own the ordered post collection persisted under the `blog-posts` key.
//! - Apply create/update/remove mutations and keep the derived excerpt in
//!   step with content changes.
//!
//! # Invariants
//! - New posts are inserted at the head; most-recent-first is the canonical
//!   order.
//! - `id` and `created_at` survive every update.
//! - `excerpt` is re-derived whenever content changes and only then.

use crate::clock::Clock;
use crate::model::post::{derive_excerpt, parse_tags, Post, PostId};
use crate::storage::KeyValueStorage;
use crate::store::{
    load_collection, persist_collection, ChangeObserver, Mutation, PersistStatus, StoreChange,
};
use log::{debug, info};
use std::sync::Arc;

/// Fixed storage key for the post collection.
pub const POSTS_KEY: &str = "blog-posts";

const MODULE: &str = "post_store";

/// Input for creating one post. `tags_input` is the raw comma-separated
/// tag string as typed by the user.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub tags_input: String,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags_input: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags_input: tags_input.into(),
        }
    }
}

/// Partial update for one post; only provided fields are replaced.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags_input: Option<String>,
}

/// Authoritative post collection mirrored to key-value storage.
pub struct PostStore<S: KeyValueStorage> {
    storage: S,
    clock: Arc<dyn Clock>,
    posts: Vec<Post>,
    observers: Vec<Box<dyn ChangeObserver>>,
}

impl<S: KeyValueStorage> PostStore<S> {
    /// Loads the persisted collection, falling back to empty on any read or
    /// decode failure.
    pub fn load(storage: S, clock: Arc<dyn Clock>) -> Self {
        let posts: Vec<Post> = load_collection(&storage, POSTS_KEY, MODULE);
        info!(
            "event=store_load module={MODULE} status=ok key={POSTS_KEY} count={}",
            posts.len()
        );
        Self {
            storage,
            clock,
            posts,
            observers: Vec::new(),
        }
    }

    /// Registers a change observer notified after each applied mutation.
    pub fn subscribe(&mut self, observer: Box<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Creates a post at the head of the collection.
    ///
    /// Title and content must both be non-empty after trimming; otherwise
    /// the draft is rejected silently.
    pub fn create(&mut self, draft: PostDraft) -> Mutation<Post> {
        let title = draft.title.trim();
        let content = draft.content.trim();
        if title.is_empty() || content.is_empty() {
            debug!("event=post_create module={MODULE} status=rejected reason=empty_required_field");
            return Mutation::Rejected;
        }

        let post = Post::new(
            title,
            content,
            parse_tags(&draft.tags_input),
            self.clock.now_epoch_ms(),
        );
        self.posts.insert(0, post.clone());
        let persist = self.persist();
        self.notify(StoreChange::Created(post.id));
        debug!("event=post_create module={MODULE} status=ok id={}", post.id);
        Mutation::Applied {
            record: post,
            persist,
        }
    }

    /// Replaces only the fields provided in `patch`, keeping `id` and
    /// `created_at` untouched and re-deriving the excerpt when content
    /// changes.
    pub fn update(&mut self, id: PostId, patch: PostPatch) -> Mutation<Post> {
        if let Some(title) = patch.title.as_deref() {
            if title.trim().is_empty() {
                debug!("event=post_update module={MODULE} status=rejected reason=empty_title");
                return Mutation::Rejected;
            }
        }
        if let Some(content) = patch.content.as_deref() {
            if content.trim().is_empty() {
                debug!("event=post_update module={MODULE} status=rejected reason=empty_content");
                return Mutation::Rejected;
            }
        }

        let Some(index) = self.position(id) else {
            return Mutation::Missing;
        };

        let record = {
            let post = &mut self.posts[index];
            if let Some(title) = patch.title {
                post.title = title.trim().to_string();
            }
            if let Some(content) = patch.content {
                post.content = content.trim().to_string();
                post.excerpt = derive_excerpt(&post.content);
            }
            if let Some(tags_input) = patch.tags_input {
                post.tags = parse_tags(&tags_input);
            }
            post.clone()
        };

        let persist = self.persist();
        self.notify(StoreChange::Updated(id));
        Mutation::Applied { record, persist }
    }

    /// Removes the matching post; returns the removed record.
    pub fn remove(&mut self, id: PostId) -> Mutation<Post> {
        let Some(index) = self.position(id) else {
            return Mutation::Missing;
        };

        let record = self.posts.remove(index);
        let persist = self.persist();
        self.notify(StoreChange::Removed(id));
        debug!("event=post_remove module={MODULE} status=ok id={id}");
        Mutation::Applied { record, persist }
    }

    fn position(&self, id: PostId) -> Option<usize> {
        self.posts.iter().position(|post| post.id == id)
    }

    fn persist(&mut self) -> PersistStatus {
        persist_collection(&mut self.storage, POSTS_KEY, &self.posts, MODULE)
    }

    fn notify(&self, change: StoreChange) {
        for observer in &self.observers {
            observer.on_change(&change);
        }
    }
}
