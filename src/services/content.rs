use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::repository::errors::RepositoryError;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::article::Article;
use crate::domain::recipe::Recipe;
use crate::domain::types::{CategoryId, Slug};
use crate::forms::content::{AddArticleFormPayload, AddRecipeFormPayload};
use crate::repository::{
    ArticleReader, ArticleWriter, CategoryReader, ContentListQuery, RecipeReader, RecipeWriter,
};
use crate::services::{ServiceError, ServiceResult};

/// Build the listing query, resolving the optional category slug.
fn content_query<R>(
    repo: &R,
    category: Option<&Slug>,
    page: usize,
) -> ServiceResult<ContentListQuery>
where
    R: CategoryReader,
{
    let mut query = ContentListQuery::default().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(slug) = category {
        match repo.get_category_by_slug(slug) {
            Ok(Some(category)) => query = query.category(category.id),
            Ok(None) => return Err(ServiceError::NotFound),
            Err(e) => {
                log::error!("Failed to get category by slug: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }
    Ok(query)
}

fn ensure_category_exists<R>(repo: &R, category_id: Option<CategoryId>) -> ServiceResult<()>
where
    R: CategoryReader,
{
    let Some(category_id) = category_id else {
        return Ok(());
    };
    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_articles<R>(
    category: Option<&Slug>,
    page: usize,
    repo: &R,
) -> ServiceResult<Paginated<Article>>
where
    R: ArticleReader + CategoryReader,
{
    let page = page.max(1);
    let query = content_query(repo, category, page)?;

    match repo.list_articles(query) {
        Ok((total, items)) => Ok(Paginated::new(
            items,
            page,
            total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        )),
        Err(e) => {
            log::error!("Failed to list articles: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_article<R>(slug: &Slug, repo: &R) -> ServiceResult<Article>
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

pub fn list_recipes<R>(
    category: Option<&Slug>,
    page: usize,
    repo: &R,
) -> ServiceResult<Paginated<Recipe>>
where
    R: RecipeReader + CategoryReader,
{
    let page = page.max(1);
    let query = content_query(repo, category, page)?;

    match repo.list_recipes(query) {
        Ok((total, items)) => Ok(Paginated::new(
            items,
            page,
            total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        )),
        Err(e) => {
            log::error!("Failed to list recipes: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_recipe<R>(slug: &Slug, repo: &R) -> ServiceResult<Recipe>
where
    R: RecipeReader,
{
    match repo.get_recipe_by_slug(slug) {
        Ok(Some(recipe)) => Ok(recipe),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get recipe: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_article<R>(
    payload: AddArticleFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Article>
where
    R: ArticleWriter + CategoryReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    ensure_category_exists(repo, payload.category_id)?;

    match repo.create_article(&payload.into_new_article()) {
        Ok(article) => Ok(article),
        Err(RepositoryError::ValidationError(message)) => Err(ServiceError::Form(message)),
        Err(e) => {
            log::error!("Failed to create article: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_recipe<R>(
    payload: AddRecipeFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Recipe>
where
    R: RecipeWriter + CategoryReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    ensure_category_exists(repo, payload.category_id)?;

    match repo.create_recipe(&payload.into_new_recipe()) {
        Ok(recipe) => Ok(recipe),
        Err(RepositoryError::ValidationError(message)) => Err(ServiceError::Form(message)),
        Err(e) => {
            log::error!("Failed to create recipe: {e}");
            Err(ServiceError::Internal)
        }
    }
}
