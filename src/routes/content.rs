use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::types::Slug;
use crate::forms::content::{
    AddArticleForm, AddArticleFormPayload, AddRecipeForm, AddRecipeFormPayload, ContentListParams,
};
use crate::repository::DieselRepository;
use crate::routes::{error_response, json_response};
use crate::services::{ServiceError, ServiceResult};
use crate::services::content::{
    add_article as add_article_service, add_recipe as add_recipe_service,
    list_articles as list_articles_service, list_recipes as list_recipes_service,
    show_article as show_article_service, show_recipe as show_recipe_service,
};

fn category_filter(params: &ContentListParams) -> ServiceResult<Option<Slug>> {
    Ok(params.category.as_deref().map(Slug::new).transpose()?)
}

#[get("/articles")]
pub async fn list_articles(
    params: web::Query<ContentListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category = match category_filter(&params) {
        Ok(category) => category,
        Err(e) => return error_response(e),
    };
    let page = params.page.unwrap_or(1);

    json_response(list_articles_service(category.as_ref(), page, repo.get_ref()))
}

#[get("/articles/{slug}")]
pub async fn show_article(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let slug = match Slug::new(slug.into_inner()) {
        Ok(slug) => slug,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    json_response(show_article_service(&slug, repo.get_ref()))
}

#[get("/recipes")]
pub async fn list_recipes(
    params: web::Query<ContentListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category = match category_filter(&params) {
        Ok(category) => category,
        Err(e) => return error_response(e),
    };
    let page = params.page.unwrap_or(1);

    json_response(list_recipes_service(category.as_ref(), page, repo.get_ref()))
}

#[get("/recipes/{slug}")]
pub async fn show_recipe(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let slug = match Slug::new(slug.into_inner()) {
        Ok(slug) => slug,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    json_response(show_recipe_service(&slug, repo.get_ref()))
}

#[post("/articles")]
pub async fn add_article(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddArticleForm>,
) -> impl Responder {
    let payload: AddArticleFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match add_article_service(payload, &user, repo.get_ref()) {
        Ok(article) => HttpResponse::Created().json(article),
        Err(err) => error_response(err),
    }
}

#[post("/recipes")]
pub async fn add_recipe(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddRecipeForm>,
) -> impl Responder {
    let payload: AddRecipeFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match add_recipe_service(payload, &user, repo.get_ref()) {
        Ok(recipe) => HttpResponse::Created().json(recipe),
        Err(err) => error_response(err),
    }
}
