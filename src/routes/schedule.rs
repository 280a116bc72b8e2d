use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::domain::schedule::CalendarMonth;
use crate::domain::types::PublicationId;
use crate::forms::schedule::{
    CalendarParams, RescheduleForm, RescheduleFormPayload, ScheduleContentForm,
    ScheduleContentFormPayload, UpcomingParams,
};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{empty_response, error_response, json_response};
use crate::services::ServiceError;
use crate::services::schedule::{
    cancel_publication as cancel_publication_service, publish_due as publish_due_service,
    reschedule_publication as reschedule_publication_service,
    schedule_content as schedule_content_service, show_calendar as show_calendar_service,
    show_upcoming as show_upcoming_service,
};

#[get("/schedule/upcoming")]
pub async fn show_upcoming(
    params: web::Query<UpcomingParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    json_response(show_upcoming_service(
        params.limit,
        server_config.upcoming_limit,
        repo.get_ref(),
    ))
}

#[get("/schedule")]
pub async fn show_calendar(
    params: web::Query<CalendarParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let month: CalendarMonth = match params.into_inner().try_into() {
        Ok(month) => month,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    json_response(show_calendar_service(month, &user, repo.get_ref()))
}

#[post("/schedule")]
pub async fn schedule_content(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ScheduleContentForm>,
) -> impl Responder {
    let payload: ScheduleContentFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match schedule_content_service(payload, &user, repo.get_ref()) {
        Ok(()) => HttpResponse::Created().finish(),
        Err(err) => error_response(err),
    }
}

#[post("/schedule/{publication_id}/cancel")]
pub async fn cancel_publication(
    publication_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let publication_id = match PublicationId::new(publication_id.into_inner()) {
        Ok(id) => id,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    empty_response(cancel_publication_service(
        publication_id,
        &user,
        repo.get_ref(),
    ))
}

#[post("/schedule/{publication_id}/reschedule")]
pub async fn reschedule_publication(
    publication_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RescheduleForm>,
) -> impl Responder {
    let payload: RescheduleFormPayload = match (publication_id.into_inner(), form).try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    empty_response(reschedule_publication_service(
        payload,
        &user,
        repo.get_ref(),
    ))
}

#[post("/schedule/publish-due")]
pub async fn publish_due(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match publish_due_service(&user, repo.get_ref()) {
        Ok(published) => HttpResponse::Ok().json(json!({ "published": published })),
        Err(err) => error_response(err),
    }
}
