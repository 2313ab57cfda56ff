//! HTML markup adapter.
//!
//! # Responsibility
//! - Produce full replacement markup fragments for each view model.
//!
//! # Invariants
//! - Every user-supplied text field is escaped before it reaches markup.
//! - An empty projected subset renders an explicit empty-state element,
//!   never blank output.
//! - Output is a whole fragment; callers replace prior output, there is no
//!   diffing.

use crate::notify::Notice;
use crate::view::{FormMode, PostDetailView, PostFormView, PostListView, TaskListView};

/// Escapes user-supplied text for safe embedding in markup.
pub fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders the task list fragment.
pub fn task_list_markup(view: &TaskListView) -> String {
    if view.is_empty() {
        return r#"<p class="empty-state">No tasks to show</p>"#.to_string();
    }

    let mut markup = String::from(r#"<ul class="task-list">"#);
    for row in &view.rows {
        let classes = if row.completed {
            "task completed"
        } else {
            "task"
        };
        markup.push_str(&format!(
            r#"<li class="{classes}" data-id="{id}"><span class="text">{text}</span><span class="badge badge-{priority}">{priority}</span>"#,
            id = escape_text(&row.id),
            text = escape_text(&row.text),
            priority = row.priority.as_str(),
        ));
        if let Some(due_label) = &row.due_label {
            markup.push_str(&format!(
                r#"<span class="due">Due {}</span>"#,
                escape_text(due_label)
            ));
        }
        markup.push_str("</li>");
    }
    markup.push_str("</ul>");
    markup
}

/// Renders the post list fragment with per-card action affordances.
pub fn post_list_markup(view: &PostListView) -> String {
    if view.is_empty() {
        return r#"<p class="empty-state">No posts found</p>"#.to_string();
    }

    let mut markup = String::from(r#"<div class="post-list">"#);
    for card in &view.cards {
        markup.push_str(&format!(
            r#"<article class="post-card" data-id="{id}"><h2>{title}</h2><time>{created}</time>"#,
            id = escape_text(&card.id),
            title = escape_text(&card.title),
            created = escape_text(&card.created_label),
        ));
        if !card.tags.is_empty() {
            markup.push_str(r#"<ul class="tags">"#);
            for tag in &card.tags {
                markup.push_str(&format!("<li>{}</li>", escape_text(tag)));
            }
            markup.push_str("</ul>");
        }
        markup.push_str(&format!(
            r#"<p class="excerpt">{excerpt}</p><button data-action="read">Read</button><button data-action="edit">Edit</button><button data-action="delete">Delete</button></article>"#,
            excerpt = escape_text(&card.excerpt),
        ));
    }
    markup.push_str("</div>");
    markup
}

/// Renders the full post read view.
pub fn post_detail_markup(view: &PostDetailView) -> String {
    let mut markup = format!(
        r#"<article class="post" data-id="{id}"><h1>{title}</h1><time>{created}</time>"#,
        id = escape_text(&view.id),
        title = escape_text(&view.title),
        created = escape_text(&view.created_label),
    );
    if !view.tags.is_empty() {
        markup.push_str(r#"<ul class="tags">"#);
        for tag in &view.tags {
            markup.push_str(&format!("<li>{}</li>", escape_text(tag)));
        }
        markup.push_str("</ul>");
    }
    markup.push_str(&format!(
        r#"<div class="content">{}</div></article>"#,
        escape_text(&view.content)
    ));
    markup
}

/// Renders the create/edit post form with pre-populated values.
pub fn post_form_markup(view: &PostFormView) -> String {
    let (heading, submit) = match &view.mode {
        FormMode::Create => ("New post", "Publish"),
        FormMode::Edit(_) => ("Edit post", "Save"),
    };
    format!(
        r#"<form class="post-form"><h1>{heading}</h1><input name="title" value="{title}"><textarea name="content">{content}</textarea><input name="tags" value="{tags}"><button type="submit">{submit}</button><button type="button" data-action="cancel">Cancel</button></form>"#,
        title = escape_text(&view.title),
        content = escape_text(&view.content),
        tags = escape_text(&view.tags_input),
    )
}

/// Renders the notice feed fragment.
pub fn notices_markup(notices: &[Notice]) -> String {
    if notices.is_empty() {
        return String::new();
    }

    let mut markup = String::from(r#"<div class="notices">"#);
    for notice in notices {
        markup.push_str(&format!(
            r#"<p class="notice notice-{kind}">{message}</p>"#,
            kind = notice.kind.as_str(),
            message = escape_text(&notice.message),
        ));
    }
    markup.push_str("</div>");
    markup
}

#[cfg(test)]
mod tests {
    use super::{escape_text, post_list_markup, task_list_markup};
    use crate::model::task::{Priority, Task};
    use crate::view::{post_list_view, task_list_view};

    #[test]
    fn escape_covers_markup_significant_characters() {
        assert_eq!(
            escape_text(r#"<b onclick="x('&')">"#),
            "&lt;b onclick=&quot;x(&#39;&amp;&#39;)&quot;&gt;"
        );
    }

    #[test]
    fn empty_task_list_renders_explicit_empty_state() {
        let markup = task_list_markup(&task_list_view(&[]));
        assert!(markup.contains("empty-state"));
        assert!(!markup.is_empty());
    }

    #[test]
    fn empty_post_list_renders_explicit_empty_state() {
        let markup = post_list_markup(&post_list_view(&[], "nope"));
        assert!(markup.contains("empty-state"));
    }

    #[test]
    fn task_text_is_escaped_in_markup() {
        let task = Task::new("<script>alert(1)</script>", Priority::High, None, 1_000);
        let markup = task_list_markup(&task_list_view(&[&task]));
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;"));
        assert!(markup.contains("badge-high"));
    }

    #[test]
    fn rendering_is_idempotent_for_equal_views() {
        let task = Task::new("same", Priority::default(), None, 1_000);
        let view = task_list_view(&[&task]);
        assert_eq!(task_list_markup(&view), task_list_markup(&view));
    }

    #[test]
    fn completed_tasks_carry_completed_class() {
        let mut task = Task::new("done", Priority::Low, None, 1_000);
        task.completed = true;
        let markup = task_list_markup(&task_list_view(&[&task]));
        assert!(markup.contains(r#"class="task completed""#));
    }
}
