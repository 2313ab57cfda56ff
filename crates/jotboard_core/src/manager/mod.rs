//! Command-driven managers binding stores, projection, and views.
//!
//! # Responsibility
//! - Expose the command surface invoked by the surrounding UI-binding
//!   layer.
//! - Translate mutation outcomes into notices and fresh view models.
//!
//! # Invariants
//! - Commands run to completion before the next one is processed; there is
//!   no interleaving of mutations.
//! - Managers own their store exclusively; one manager instance exists per
//!   entity kind per session.

use crate::notify::Notice;
use crate::view::{PostDetailView, PostFormView, PostListView, TaskListView};

pub mod post_manager;
pub mod task_manager;

/// Display surface for the todo manager.
///
/// Implementations replace their previous output wholesale on each call.
pub trait TaskView {
    fn show_list(&mut self, view: &TaskListView);
    fn show_notices(&mut self, notices: &[Notice]);
}

/// Display surface for the blog manager.
pub trait BlogView {
    fn show_list(&mut self, view: &PostListView);
    fn show_form(&mut self, view: &PostFormView);
    fn show_post(&mut self, view: &PostDetailView);
    fn show_notices(&mut self, notices: &[Notice]);
}
