use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::newsletter::{NewsletterForm, NewsletterFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{empty_response, error_response, json_response};
use crate::services::ServiceError;
use crate::services::newsletter::{
    export_subscribers_csv as export_subscribers_csv_service,
    show_subscribers as show_subscribers_service, subscribe as subscribe_service,
    unsubscribe as unsubscribe_service,
};

#[post("/newsletter/subscribe")]
pub async fn subscribe(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<NewsletterForm>,
) -> impl Responder {
    let payload: NewsletterFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    empty_response(subscribe_service(payload, repo.get_ref()))
}

#[post("/newsletter/unsubscribe")]
pub async fn unsubscribe(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<NewsletterForm>,
) -> impl Responder {
    let payload: NewsletterFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    empty_response(unsubscribe_service(payload, repo.get_ref()))
}

#[get("/newsletter/subscribers")]
pub async fn show_subscribers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(show_subscribers_service(&user, repo.get_ref()))
}

#[get("/newsletter/export")]
pub async fn export_subscribers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match export_subscribers_csv_service(&user, repo.get_ref()) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename("subscribers.csv".into())],
            })
            .body(csv),
        Err(err) => error_response(err),
    }
}
