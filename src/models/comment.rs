use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::comment::{Comment as DomainComment, NewComment as DomainNewComment};
use crate::domain::types::{
    AuthorName, CommentBody, CommentId, CommentStatus, RejectionReason, ReportCount,
    TypeConstraintError,
};

/// Diesel model representing the `comments` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::comments)]
pub struct Comment {
    pub id: i32,
    pub article_id: i32,
    pub parent_id: Option<i32>,
    pub author_name: String,
    pub body: String,
    pub status: String,
    pub report_count: i32,
    pub rejection_reason: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Comment`]. New comments always start as pending.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub article_id: i32,
    pub parent_id: Option<i32>,
    pub author_name: &'a str,
    pub body: &'a str,
    pub status: &'static str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Comment> for DomainComment {
    type Error = TypeConstraintError;

    fn try_from(comment: Comment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: comment.id.try_into()?,
            article_id: comment.article_id.try_into()?,
            parent_id: comment.parent_id.map(CommentId::new).transpose()?,
            author_name: AuthorName::new(comment.author_name)?,
            body: CommentBody::new(comment.body)?,
            status: CommentStatus::try_from(comment.status)?,
            report_count: ReportCount::new(comment.report_count)?,
            rejection_reason: comment
                .rejection_reason
                .map(RejectionReason::new)
                .transpose()?,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewComment> for NewComment<'a> {
    fn from(comment: &'a DomainNewComment) -> Self {
        Self {
            article_id: comment.article_id.get(),
            parent_id: comment.parent_id.map(|id| id.get()),
            author_name: comment.author_name.as_str(),
            body: comment.body.as_str(),
            status: CommentStatus::Pending.as_str(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
