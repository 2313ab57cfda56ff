//! Blog manager command surface and view-state machine.
//!
//! # Responsibility
//! - Drive the post store from discrete commands.
//! - Own the list/create/edit/view screen machine and the post form state.
//!
//! # Invariants
//! - The machine starts in `List`; transitions follow the documented edges
//!   only, everything else is a no-op.
//! - Entering `Create` resets the form; entering `Edit` pre-populates it
//!   from the target record.
//! - Leaving `Create`/`Edit` without submitting discards unsaved edits.

use crate::clock::Clock;
use crate::manager::BlogView;
use crate::model::post::{Post, PostId};
use crate::notify::{NoticeFeed, NoticeKind};
use crate::project::search_posts;
use crate::storage::KeyValueStorage;
use crate::store::post_store::{PostDraft, PostPatch, PostStore};
use crate::store::{Mutation, PersistStatus};
use crate::view::{post_detail_view, post_form_view, post_list_view, tags_input_value, FormMode};
use log::debug;
use std::sync::Arc;

/// Blog manager screen state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Create,
    Edit(PostId),
    View(PostId),
}

/// Unsaved form fields for the create/edit screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub tags_input: String,
}

/// Blog post manager with injected storage, clock, and view collaborators.
pub struct PostManager<S: KeyValueStorage, V: BlogView> {
    store: PostStore<S>,
    screen: Screen,
    form: PostForm,
    query: String,
    feed: NoticeFeed,
    clock: Arc<dyn Clock>,
    view: V,
}

impl<S: KeyValueStorage, V: BlogView> PostManager<S, V> {
    /// Loads persisted posts and renders the initial list screen.
    pub fn new(storage: S, clock: Arc<dyn Clock>, view: V) -> Self {
        let store = PostStore::load(storage, clock.clone());
        let mut manager = Self {
            store,
            screen: Screen::List,
            form: PostForm::default(),
            query: String::new(),
            feed: NoticeFeed::new(),
            clock,
            view,
        };
        manager.render_list();
        manager
    }

    /// Returns to the list screen, discarding any unsaved form edits.
    pub fn show_posts_list(&mut self) {
        self.screen = Screen::List;
        self.form = PostForm::default();
        self.render_list();
    }

    /// Alias for leaving the create/edit screen without saving.
    pub fn cancel(&mut self) {
        if matches!(self.screen, Screen::Create | Screen::Edit(_)) {
            self.show_posts_list();
        }
    }

    /// Opens the empty create form. Valid from the list screen only.
    pub fn show_create_form(&mut self) {
        if self.screen != Screen::List {
            debug!("event=screen_transition module=post_manager status=ignored target=create");
            return;
        }
        self.form = PostForm::default();
        self.screen = Screen::Create;
        self.render_form(FormMode::Create);
    }

    /// Opens the edit form pre-populated from the target post.
    ///
    /// Valid from the list and read screens; an unknown id is a no-op.
    pub fn show_edit_form(&mut self, id: PostId) {
        if !matches!(self.screen, Screen::List | Screen::View(_)) {
            debug!("event=screen_transition module=post_manager status=ignored target=edit");
            return;
        }
        let Some(post) = self.store.get(id) else {
            return;
        };
        self.form = PostForm {
            title: post.title.clone(),
            content: post.content.clone(),
            tags_input: tags_input_value(&post.tags),
        };
        self.screen = Screen::Edit(id);
        self.render_form(FormMode::Edit(id.to_string()));
    }

    /// Opens the full read view. Valid from the list screen only; an
    /// unknown id is a no-op.
    pub fn show_post_view(&mut self, id: PostId) {
        if self.screen != Screen::List {
            debug!("event=screen_transition module=post_manager status=ignored target=view");
            return;
        }
        let Some(post) = self.store.get(id) else {
            return;
        };
        let detail = post_detail_view(post);
        self.screen = Screen::View(id);
        self.view.show_post(&detail);
    }

    /// Creates a post; on success returns to the list screen.
    ///
    /// Returns whether the input was accepted.
    pub fn create_post(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        tags_input: impl Into<String>,
    ) -> bool {
        let outcome = self
            .store
            .create(PostDraft::new(title, content, tags_input));
        self.settle(outcome, "Post published")
    }

    /// Updates a post with full form contents; on success returns to the
    /// list screen. An unknown id is a silent no-op.
    pub fn update_post(
        &mut self,
        id: PostId,
        title: impl Into<String>,
        content: impl Into<String>,
        tags_input: impl Into<String>,
    ) -> bool {
        let outcome = self.store.update(
            id,
            PostPatch {
                title: Some(title.into()),
                content: Some(content.into()),
                tags_input: Some(tags_input.into()),
            },
        );
        self.settle(outcome, "Post updated")
    }

    /// Deletes the matching post and shows the list screen.
    pub fn delete_post(&mut self, id: PostId) -> bool {
        let outcome = self.store.remove(id);
        self.settle(outcome, "Post deleted")
    }

    /// Updates the search query and re-renders the list when it is showing.
    pub fn render_posts_list(&mut self, query: impl Into<String>) {
        self.query = query.into();
        if self.screen == Screen::List {
            self.render_list();
        }
    }

    /// Expires stale notices; the synchronous host calls this instead of
    /// running background timers.
    pub fn tick(&mut self) {
        let now = self.clock.now_epoch_ms();
        if self.feed.sweep(now) > 0 {
            self.view.show_notices(self.feed.active());
        }
    }

    pub fn store(&self) -> &PostStore<S> {
        &self.store
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn notices(&self) -> &[crate::notify::Notice] {
        self.feed.active()
    }

    fn settle(&mut self, outcome: Mutation<Post>, message: &str) -> bool {
        let now = self.clock.now_epoch_ms();
        self.feed.sweep(now);

        let applied = match outcome {
            Mutation::Applied { persist, .. } => {
                self.feed.push(NoticeKind::Success, message, now);
                if let PersistStatus::Failed(err) = persist {
                    self.feed.push(
                        NoticeKind::Danger,
                        format!("Saving posts failed: {err}"),
                        now,
                    );
                }
                true
            }
            Mutation::Rejected => false,
            Mutation::Missing => false,
        };

        if applied {
            self.screen = Screen::List;
            self.form = PostForm::default();
            self.render_list();
        }
        self.view.show_notices(self.feed.active());
        applied
    }

    fn render_list(&mut self) {
        let projected = search_posts(self.store.posts(), &self.query);
        let view_model = post_list_view(&projected, &self.query);
        self.view.show_list(&view_model);
    }

    fn render_form(&mut self, mode: FormMode) {
        let view_model = post_form_view(
            mode,
            &self.form.title,
            &self.form.content,
            &self.form.tags_input,
        );
        self.view.show_form(&view_model);
    }
}
