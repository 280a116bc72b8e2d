use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::comment::{Comment, FLAG_THRESHOLD, NewComment};
use crate::domain::types::{CommentId, CommentStatus, RejectionReason};
use crate::models::comment::{Comment as DbComment, NewComment as DbNewComment};
use crate::repository::{
    CommentListQuery, CommentReader, CommentWriter, DieselRepository, page_window,
};

/// Statuses a moderator may still act on.
const OPEN_STATUSES: [&str; 2] = [
    CommentStatus::Pending.as_str(),
    CommentStatus::Flagged.as_str(),
];

impl CommentReader for DieselRepository {
    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<(usize, Vec<Comment>)> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = comments::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(article_id) = query.article_id {
                items = items.filter(comments::article_id.eq(article_id.get()));
            }
            if let Some(status) = query.status {
                items = items.filter(comments::status.eq(status.as_str()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_window(pagination);
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .order((comments::created_at.asc(), comments::id.asc()))
            .load::<DbComment>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Comment>, _>>()?;

        Ok((total, items))
    }

    fn get_comment_by_id(&self, id: CommentId) -> RepositoryResult<Option<Comment>> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let comment = comments::table
            .filter(comments::id.eq(id.get()))
            .first::<DbComment>(&mut conn)
            .optional()?;

        let comment = comment.map(TryInto::try_into).transpose()?;
        Ok(comment)
    }
}

impl CommentWriter for DieselRepository {
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<usize> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        let db_comment: DbNewComment = comment.into();

        let affected = diesel::insert_into(comments::table)
            .values(&db_comment)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn report_comment(&self, id: CommentId) -> RepositoryResult<Option<Comment>> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let comment = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let reported = diesel::update(comments::table.filter(comments::id.eq(id.get())))
                .set((
                    comments::report_count.eq(comments::report_count + 1),
                    comments::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;
            if reported == 0 {
                return Ok(None);
            }

            diesel::update(
                comments::table
                    .filter(comments::id.eq(id.get()))
                    .filter(comments::status.eq(CommentStatus::Pending.as_str()))
                    .filter(comments::report_count.ge(FLAG_THRESHOLD)),
            )
            .set(comments::status.eq(CommentStatus::Flagged.as_str()))
            .execute(conn)?;

            comments::table
                .filter(comments::id.eq(id.get()))
                .first::<DbComment>(conn)
                .optional()
        })?;

        let comment = comment.map(TryInto::try_into).transpose()?;
        Ok(comment)
    }

    fn approve_comment(&self, id: CommentId) -> RepositoryResult<usize> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            comments::table
                .filter(comments::id.eq(id.get()))
                .filter(comments::status.eq_any(OPEN_STATUSES)),
        )
        .set((
            comments::status.eq(CommentStatus::Approved.as_str()),
            comments::rejection_reason.eq(None::<String>),
            comments::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn reject_comment(&self, id: CommentId, reason: &RejectionReason) -> RepositoryResult<usize> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            comments::table
                .filter(comments::id.eq(id.get()))
                .filter(comments::status.eq_any(OPEN_STATUSES)),
        )
        .set((
            comments::status.eq(CommentStatus::Rejected.as_str()),
            comments::rejection_reason.eq(Some(reason.as_str())),
            comments::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
