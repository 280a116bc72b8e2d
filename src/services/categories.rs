use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::repository::errors::RepositoryError;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::category::{CategoryTreeNode, build_category_tree, creates_cycle};
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{AddCategoryFormPayload, UpdateCategoryFormPayload};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

fn map_write_error(e: RepositoryError) -> ServiceError {
    match e {
        RepositoryError::ValidationError(message) => ServiceError::Form(message),
        e => {
            log::error!("Failed to write category: {e}");
            ServiceError::Internal
        }
    }
}

fn ensure_parent_exists<R>(repo: &R, parent_id: Option<CategoryId>) -> ServiceResult<()>
where
    R: CategoryReader,
{
    let Some(parent_id) = parent_id else {
        return Ok(());
    };
    match repo.get_category_by_id(parent_id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get parent category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Public category navigation tree.
pub fn show_category_tree<R>(repo: &R) -> ServiceResult<Vec<CategoryTreeNode>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(build_category_tree(categories)),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_categories<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let tree = show_category_tree(repo)?;
    Ok(CategoryDto::from_tree(&tree))
}

pub fn add_category<R>(
    payload: AddCategoryFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    ensure_parent_exists(repo, payload.parent_id)?;

    let category = payload.into_new_category();
    repo.create_category(&category).map_err(map_write_error)?;
    Ok(())
}

pub fn update_category<R>(
    payload: UpdateCategoryFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let categories = match repo.list_categories() {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if !categories.iter().any(|c| c.id == payload.category_id) {
        return Err(ServiceError::NotFound);
    }

    if let Some(parent_id) = payload.update.parent_id {
        if !categories.iter().any(|c| c.id == parent_id) {
            return Err(ServiceError::NotFound);
        }
        if creates_cycle(&categories, payload.category_id, parent_id) {
            return Err(ServiceError::Form(
                "A category cannot be nested under itself or its descendants".into(),
            ));
        }
    }

    repo.update_category(payload.category_id, &payload.update)
        .map_err(map_write_error)?;
    Ok(())
}

pub fn delete_category<R>(
    category_id: CategoryId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_category(category_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(ServiceError::Internal)
        }
    }
}
