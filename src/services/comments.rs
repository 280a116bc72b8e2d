use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::repository::errors::RepositoryResult;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::article::Article;
use crate::domain::comment::{
    Comment, FLAG_THRESHOLD, MAX_REPLY_DEPTH, ModerationError, build_comment_threads,
};
use crate::domain::types::{CommentId, CommentStatus, Slug};
use crate::dto::comments::PublicCommentDto;
use crate::forms::comments::{PostCommentFormPayload, RejectCommentFormPayload};
use crate::repository::{ArticleReader, CommentListQuery, CommentReader, CommentWriter};
use crate::services::{ServiceError, ServiceResult};

fn load_article<R>(repo: &R, slug: &Slug) -> ServiceResult<Article>
where
    R: ArticleReader,
{
    match repo.get_article_by_slug(slug) {
        Ok(Some(article)) => Ok(article),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get article: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn load_comment<R>(repo: &R, id: CommentId) -> ServiceResult<Comment>
where
    R: CommentReader,
{
    match repo.get_comment_by_id(id) {
        Ok(Some(comment)) => Ok(comment),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get comment: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Number of comments above `comment` in its thread, counted up to `limit`.
fn reply_depth<R>(repo: &R, comment: &Comment, limit: usize) -> ServiceResult<usize>
where
    R: CommentReader,
{
    let mut depth = 0;
    let mut ancestor = comment.parent_id;
    while let Some(id) = ancestor {
        if depth >= limit {
            break;
        }
        match repo.get_comment_by_id(id) {
            Ok(Some(parent)) => {
                depth += 1;
                ancestor = parent.parent_id;
            }
            Ok(None) => break,
            Err(e) => {
                log::error!("Failed to get parent comment: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }
    Ok(depth)
}

/// Outcome of a guarded moderation write. Zero changed rows means another
/// moderator got there first.
fn finish_moderation<R>(
    repo: &R,
    id: CommentId,
    written: RepositoryResult<usize>,
) -> ServiceResult<()>
where
    R: CommentReader,
{
    match written {
        Ok(0) => {
            let current = load_comment(repo, id)?;
            Err(ModerationError::AlreadyModerated(current.status).into())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to moderate comment: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Approved comments of an article arranged into reply threads.
pub fn show_comment_thread<R>(slug: &Slug, repo: &R) -> ServiceResult<Vec<PublicCommentDto>>
where
    R: ArticleReader + CommentReader,
{
    let article = load_article(repo, slug)?;
    let query = CommentListQuery::default()
        .article(article.id)
        .status(CommentStatus::Approved);

    match repo.list_comments(query) {
        Ok((_total, comments)) => Ok(PublicCommentDto::from_threads(build_comment_threads(
            comments,
        ))),
        Err(e) => {
            log::error!("Failed to list comments: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Store a reader comment. It stays hidden until a moderator approves it.
pub fn post_comment<R>(slug: &Slug, payload: PostCommentFormPayload, repo: &R) -> ServiceResult<()>
where
    R: ArticleReader + CommentReader + CommentWriter,
{
    let article = load_article(repo, slug)?;

    if let Some(parent_id) = payload.parent_id {
        let parent = load_comment(repo, parent_id)?;
        if parent.article_id != article.id {
            return Err(ServiceError::Form(
                "Replies must belong to the same article".into(),
            ));
        }
        if reply_depth(repo, &parent, MAX_REPLY_DEPTH)? >= MAX_REPLY_DEPTH {
            return Err(ServiceError::Form(format!(
                "Replies cannot be nested more than {MAX_REPLY_DEPTH} levels deep"
            )));
        }
    }

    match repo.create_comment(&payload.into_new_comment(article.id)) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to create comment: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn report_comment<R>(comment_id: CommentId, repo: &R) -> ServiceResult<()>
where
    R: CommentWriter,
{
    match repo.report_comment(comment_id) {
        Ok(Some(comment)) => {
            if comment.status == CommentStatus::Flagged
                && comment.report_count.get() == FLAG_THRESHOLD
            {
                log::info!("Comment {} flagged after {FLAG_THRESHOLD} reports", comment.id);
            }
            Ok(())
        }
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to report comment: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_moderation_queue<R>(
    status: Option<CommentStatus>,
    page: usize,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Paginated<Comment>>
where
    R: CommentReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let page = page.max(1);
    let mut query = CommentListQuery::default().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = status {
        query = query.status(status);
    }

    match repo.list_comments(query) {
        Ok((total, items)) => Ok(Paginated::new(
            items,
            page,
            total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        )),
        Err(e) => {
            log::error!("Failed to list comments: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn approve_comment<R>(
    comment_id: CommentId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: CommentReader + CommentWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut comment = load_comment(repo, comment_id)?;
    comment.approve()?;
    finish_moderation(repo, comment.id, repo.approve_comment(comment.id))
}

pub fn reject_comment<R>(
    payload: RejectCommentFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: CommentReader + CommentWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut comment = load_comment(repo, payload.comment_id)?;
    comment.reject(payload.reason.clone())?;
    finish_moderation(
        repo,
        comment.id,
        repo.reject_comment(comment.id, &payload.reason),
    )
}
