use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{CategoryUpdate, NewCategory};
use crate::domain::types::{CategoryId, CategoryName, Slug, TypeConstraintError};
use crate::forms::slug_or_derived;

#[derive(Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    /// Derived from the name when omitted.
    pub slug: Option<String>,
    #[validate(range(min = 1))]
    pub parent_id: Option<i32>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name: CategoryName,
    pub slug: Slug,
    pub parent_id: Option<CategoryId>,
    pub sort_order: i32,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            slug: self.slug,
            parent_id: self.parent_id,
            sort_order: self.sort_order,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddCategoryFormError {
    #[error("Add category form validation failed: {0}")]
    Validation(String),
    #[error("Add category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = AddCategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = CategoryName::new(value.name)?;
        let slug = slug_or_derived(value.slug, name.as_str())?;

        Ok(Self {
            name,
            slug,
            parent_id: value.parent_id.map(CategoryId::new).transpose()?,
            sort_order: value.order,
        })
    }
}

/// Full replacement of a category's editable fields. The category id comes
/// from the request path.
#[derive(Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub slug: Option<String>,
    #[validate(range(min = 1))]
    pub parent_id: Option<i32>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub category_id: CategoryId,
    pub update: CategoryUpdate,
}

#[derive(Debug, Error)]
pub enum UpdateCategoryFormError {
    #[error("Update category form validation failed: {0}")]
    Validation(String),
    #[error("Update category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<(i32, UpdateCategoryForm)> for UpdateCategoryFormPayload {
    type Error = UpdateCategoryFormError;

    fn try_from((category_id, value): (i32, UpdateCategoryForm)) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = CategoryName::new(value.name)?;
        let slug = slug_or_derived(value.slug, name.as_str())?;

        Ok(Self {
            category_id: CategoryId::new(category_id)?,
            update: CategoryUpdate {
                name,
                slug,
                parent_id: value.parent_id.map(CategoryId::new).transpose()?,
                sort_order: value.order,
            },
        })
    }
}
