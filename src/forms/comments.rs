use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::comment::NewComment;
use crate::domain::types::{
    ArticleId, AuthorName, CommentBody, CommentId, CommentStatus, RejectionReason,
    TypeConstraintError,
};

/// Query string of the admin moderation queue.
#[derive(Debug, Default, Deserialize)]
pub struct ModerationQueueParams {
    /// One of `pending`, `flagged`, `approved` or `rejected`.
    pub status: Option<String>,
    pub page: Option<usize>,
}

impl ModerationQueueParams {
    pub fn status(&self) -> Result<Option<CommentStatus>, TypeConstraintError> {
        self.status
            .as_deref()
            .map(CommentStatus::try_from)
            .transpose()
    }
}

#[derive(Deserialize, Validate)]
pub struct PostCommentForm {
    /// Comment being replied to.
    #[validate(range(min = 1))]
    pub parent_id: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub author_name: String,
    #[validate(length(min = 1, max = 5000))]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostCommentFormPayload {
    pub parent_id: Option<CommentId>,
    pub author_name: AuthorName,
    pub body: CommentBody,
}

impl PostCommentFormPayload {
    pub fn into_new_comment(self, article_id: ArticleId) -> NewComment {
        let now = Utc::now().naive_utc();
        NewComment {
            article_id,
            parent_id: self.parent_id,
            author_name: self.author_name,
            body: self.body,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum PostCommentFormError {
    #[error("Comment form validation failed: {0}")]
    Validation(String),
    #[error("Comment form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for PostCommentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for PostCommentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<PostCommentForm> for PostCommentFormPayload {
    type Error = PostCommentFormError;

    fn try_from(value: PostCommentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            parent_id: value.parent_id.map(CommentId::new).transpose()?,
            author_name: AuthorName::new(value.author_name)?,
            body: CommentBody::new(value.body)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct RejectCommentForm {
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectCommentFormPayload {
    pub comment_id: CommentId,
    pub reason: RejectionReason,
}

#[derive(Debug, Error)]
pub enum RejectCommentFormError {
    #[error("Reject comment form validation failed: {0}")]
    Validation(String),
    #[error("Reject comment form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for RejectCommentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RejectCommentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<(i32, RejectCommentForm)> for RejectCommentFormPayload {
    type Error = RejectCommentFormError;

    fn try_from((comment_id, value): (i32, RejectCommentForm)) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            comment_id: CommentId::new(comment_id)?,
            reason: RejectionReason::new(value.reason)?,
        })
    }
}
