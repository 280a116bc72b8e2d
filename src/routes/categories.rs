use actix_web::{Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::types::CategoryId;
use crate::forms::categories::{
    AddCategoryForm, AddCategoryFormPayload, UpdateCategoryForm, UpdateCategoryFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::{empty_response, error_response, json_response};
use crate::services::ServiceError;
use crate::services::categories::{
    add_category as add_category_service, delete_category as delete_category_service,
    show_categories as show_categories_service, show_category_tree as show_category_tree_service,
    update_category as update_category_service,
};

#[get("/categories")]
pub async fn show_category_tree(repo: web::Data<DieselRepository>) -> impl Responder {
    json_response(show_category_tree_service(repo.get_ref()))
}

#[get("/categories")]
pub async fn show_categories(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(show_categories_service(&user, repo.get_ref()))
}

#[post("/categories")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddCategoryForm>,
) -> impl Responder {
    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    empty_response(add_category_service(payload, &user, repo.get_ref()))
}

#[post("/categories/{category_id}/update")]
pub async fn update_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateCategoryForm>,
) -> impl Responder {
    let payload: UpdateCategoryFormPayload = match (category_id.into_inner(), form).try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    empty_response(update_category_service(payload, &user, repo.get_ref()))
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = match CategoryId::new(category_id.into_inner()) {
        Ok(id) => id,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    empty_response(delete_category_service(category_id, &user, repo.get_ref()))
}
