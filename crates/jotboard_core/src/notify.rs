//! Transient notification feed.
//!
//! # Responsibility
//! - Collect short-lived categorized feedback messages after mutations.
//! - Expire messages a fixed duration after they were posted.
//!
//! # Invariants
//! - Multiple notices coexist; there is no deduplication.
//! - Expiry only removes notices; it never touches store or view state.
//! - The feed has no background timers; the host drives expiry through the
//!   managers.

/// How long a notice stays visible, in milliseconds.
pub const NOTICE_TTL_MS: i64 = 3_000;

/// Visual category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// One feedback message with its expiry instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: i64,
}

/// Ordered feed of live notices.
#[derive(Debug, Default)]
pub struct NoticeFeed {
    notices: Vec<Notice>,
}

impl NoticeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one notice expiring [`NOTICE_TTL_MS`] after `now_ms`.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>, now_ms: i64) {
        self.notices.push(Notice {
            kind,
            message: message.into(),
            expires_at: now_ms + NOTICE_TTL_MS,
        });
    }

    /// Drops expired notices; returns how many were removed.
    pub fn sweep(&mut self, now_ms: i64) -> usize {
        let before = self.notices.len();
        self.notices.retain(|notice| notice.expires_at > now_ms);
        before - self.notices.len()
    }

    /// Currently live notices in posting order.
    pub fn active(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{NoticeFeed, NoticeKind, NOTICE_TTL_MS};

    #[test]
    fn notices_expire_after_ttl() {
        let mut feed = NoticeFeed::new();
        feed.push(NoticeKind::Success, "saved", 1_000);

        assert_eq!(feed.sweep(1_000 + NOTICE_TTL_MS - 1), 0);
        assert_eq!(feed.active().len(), 1);

        assert_eq!(feed.sweep(1_000 + NOTICE_TTL_MS), 1);
        assert!(feed.is_empty());
    }

    #[test]
    fn duplicate_messages_coexist() {
        let mut feed = NoticeFeed::new();
        feed.push(NoticeKind::Info, "same", 0);
        feed.push(NoticeKind::Info, "same", 0);
        assert_eq!(feed.active().len(), 2);
    }

    #[test]
    fn sweep_keeps_later_notices() {
        let mut feed = NoticeFeed::new();
        feed.push(NoticeKind::Success, "old", 0);
        feed.push(NoticeKind::Danger, "new", 2_000);

        feed.sweep(NOTICE_TTL_MS);
        assert_eq!(feed.active().len(), 1);
        assert_eq!(feed.active()[0].message, "new");
        assert_eq!(feed.active()[0].kind, NoticeKind::Danger);
    }
}
