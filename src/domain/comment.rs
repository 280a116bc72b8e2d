use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::tree::{TreeItem, TreeNode, build_forest};
use crate::domain::types::{
    ArticleId, AuthorName, CommentBody, CommentId, CommentStatus, RejectionReason, ReportCount,
};

/// Number of reader reports after which a pending comment is flagged.
pub const FLAG_THRESHOLD: i32 = 3;

/// Deepest allowed reply nesting; a top-level comment has depth 0.
pub const MAX_REPLY_DEPTH: usize = 16;

/// Reader comment on an article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    /// Comment this one replies to.
    pub parent_id: Option<CommentId>,
    pub author_name: AuthorName,
    pub body: CommentBody,
    pub status: CommentStatus,
    pub report_count: ReportCount,
    pub rejection_reason: Option<RejectionReason>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Comment`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewComment {
    pub article_id: ArticleId,
    pub parent_id: Option<CommentId>,
    pub author_name: AuthorName,
    pub body: CommentBody,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Moderation action rejected by the comment state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModerationError {
    #[error("comment was already {0}")]
    AlreadyModerated(CommentStatus),
}

impl Comment {
    /// Publish the comment. Allowed from pending or flagged.
    pub fn approve(&mut self) -> Result<(), ModerationError> {
        self.ensure_open()?;
        self.status = CommentStatus::Approved;
        self.rejection_reason = None;
        Ok(())
    }

    /// Hide the comment for the given reason. Allowed from pending or flagged.
    pub fn reject(&mut self, reason: RejectionReason) -> Result<(), ModerationError> {
        self.ensure_open()?;
        self.status = CommentStatus::Rejected;
        self.rejection_reason = Some(reason);
        Ok(())
    }

    /// Count a reader report; a pending comment reaching
    /// [`FLAG_THRESHOLD`] reports becomes flagged.
    pub fn report(&mut self) {
        let reports = self.report_count.get().saturating_add(1);
        self.report_count = ReportCount::new(reports).unwrap_or(self.report_count);
        if self.status == CommentStatus::Pending && reports >= FLAG_THRESHOLD {
            self.status = CommentStatus::Flagged;
        }
    }

    fn ensure_open(&self) -> Result<(), ModerationError> {
        match self.status {
            CommentStatus::Pending | CommentStatus::Flagged => Ok(()),
            moderated @ (CommentStatus::Approved | CommentStatus::Rejected) => {
                Err(ModerationError::AlreadyModerated(moderated))
            }
        }
    }
}

impl TreeItem for Comment {
    type Key = CommentId;

    fn key(&self) -> CommentId {
        self.id
    }

    fn parent_key(&self) -> Option<CommentId> {
        self.parent_id
    }
}

/// A comment with its replies.
pub type CommentThread = TreeNode<Comment>;

/// Arrange approved comments into reply threads, oldest first.
///
/// Replies to comments that are not approved surface at the top level.
pub fn build_comment_threads(comments: Vec<Comment>) -> Vec<CommentThread> {
    let visible = comments
        .into_iter()
        .filter(|comment| comment.status == CommentStatus::Approved)
        .collect();
    build_forest(visible, |comment| (comment.created_at, comment.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn comment(id: i32, parent_id: Option<i32>, status: CommentStatus) -> Comment {
        Comment {
            id: CommentId::new(id).unwrap(),
            article_id: ArticleId::new(1).unwrap(),
            parent_id: parent_id.map(|p| CommentId::new(p).unwrap()),
            author_name: AuthorName::new("Reader").unwrap(),
            body: CommentBody::new("Tasty!").unwrap(),
            status,
            report_count: ReportCount::default(),
            rejection_reason: None,
            created_at: DateTime::from_timestamp(i64::from(id) * 60, 0)
                .unwrap()
                .naive_utc(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn approves_pending_and_flagged_comments() {
        let mut pending = comment(1, None, CommentStatus::Pending);
        pending.approve().unwrap();
        assert_eq!(pending.status, CommentStatus::Approved);

        let mut flagged = comment(2, None, CommentStatus::Flagged);
        flagged.approve().unwrap();
        assert_eq!(flagged.status, CommentStatus::Approved);
    }

    #[test]
    fn rejection_records_reason() {
        let mut c = comment(1, None, CommentStatus::Pending);
        c.reject(RejectionReason::new("spam link").unwrap()).unwrap();

        assert_eq!(c.status, CommentStatus::Rejected);
        assert_eq!(c.rejection_reason.unwrap().as_str(), "spam link");
    }

    #[test]
    fn moderated_comments_are_terminal() {
        let mut approved = comment(1, None, CommentStatus::Approved);
        assert_eq!(
            approved.reject(RejectionReason::new("late").unwrap()),
            Err(ModerationError::AlreadyModerated(CommentStatus::Approved))
        );

        let mut rejected = comment(2, None, CommentStatus::Rejected);
        assert_eq!(
            rejected.approve(),
            Err(ModerationError::AlreadyModerated(CommentStatus::Rejected))
        );
    }

    #[test]
    fn third_report_flags_pending_comment() {
        let mut c = comment(1, None, CommentStatus::Pending);
        c.report();
        c.report();
        assert_eq!(c.status, CommentStatus::Pending);
        c.report();
        assert_eq!(c.status, CommentStatus::Flagged);
        assert_eq!(c.report_count.get(), 3);
    }

    #[test]
    fn reports_do_not_reopen_approved_comments() {
        let mut c = comment(1, None, CommentStatus::Approved);
        for _ in 0..5 {
            c.report();
        }
        assert_eq!(c.status, CommentStatus::Approved);
        assert_eq!(c.report_count.get(), 5);
    }

    #[test]
    fn threads_only_contain_approved_comments() {
        let threads = build_comment_threads(vec![
            comment(1, None, CommentStatus::Approved),
            comment(2, Some(1), CommentStatus::Approved),
            comment(3, None, CommentStatus::Pending),
            comment(4, Some(3), CommentStatus::Approved),
            comment(5, Some(1), CommentStatus::Rejected),
        ]);

        let roots: Vec<i32> = threads.iter().map(|t| t.item.id.get()).collect();
        assert_eq!(roots, vec![1, 4]);
        assert_eq!(threads[0].children.len(), 1);
        assert_eq!(threads[0].children[0].item.id, 2);
    }
}
