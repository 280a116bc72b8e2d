use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::types::{CommentId, Slug};
use crate::forms::comments::{
    ModerationQueueParams, PostCommentForm, PostCommentFormPayload, RejectCommentForm,
    RejectCommentFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::{empty_response, error_response, json_response};
use crate::services::ServiceError;
use crate::services::comments::{
    approve_comment as approve_comment_service, post_comment as post_comment_service,
    reject_comment as reject_comment_service, report_comment as report_comment_service,
    show_comment_thread as show_comment_thread_service,
    show_moderation_queue as show_moderation_queue_service,
};

#[get("/articles/{slug}/comments")]
pub async fn show_comment_thread(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let slug = match Slug::new(slug.into_inner()) {
        Ok(slug) => slug,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    json_response(show_comment_thread_service(&slug, repo.get_ref()))
}

#[post("/articles/{slug}/comments")]
pub async fn post_comment(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PostCommentForm>,
) -> impl Responder {
    let slug = match Slug::new(slug.into_inner()) {
        Ok(slug) => slug,
        Err(e) => return error_response(ServiceError::from(e)),
    };
    let payload: PostCommentFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match post_comment_service(&slug, payload, repo.get_ref()) {
        Ok(()) => HttpResponse::Accepted().finish(),
        Err(err) => error_response(err),
    }
}

#[post("/comments/{comment_id}/report")]
pub async fn report_comment(
    comment_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let comment_id = match CommentId::new(comment_id.into_inner()) {
        Ok(id) => id,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    empty_response(report_comment_service(comment_id, repo.get_ref()))
}

#[get("/comments")]
pub async fn show_moderation_queue(
    params: web::Query<ModerationQueueParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let status = match params.status() {
        Ok(status) => status,
        Err(e) => return error_response(ServiceError::from(e)),
    };
    let page = params.page.unwrap_or(1);

    json_response(show_moderation_queue_service(
        status,
        page,
        &user,
        repo.get_ref(),
    ))
}

#[post("/comments/{comment_id}/approve")]
pub async fn approve_comment(
    comment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let comment_id = match CommentId::new(comment_id.into_inner()) {
        Ok(id) => id,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    empty_response(approve_comment_service(comment_id, &user, repo.get_ref()))
}

#[post("/comments/{comment_id}/reject")]
pub async fn reject_comment(
    comment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RejectCommentForm>,
) -> impl Responder {
    let payload: RejectCommentFormPayload = match (comment_id.into_inner(), form).try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    empty_response(reject_comment_service(payload, &user, repo.get_ref()))
}
