use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::article::NewArticle;
use crate::domain::recipe::NewRecipe;
use crate::domain::types::{
    ArticleBody, AuthorName, CategoryId, ContentTitle, RecipeDescription, RecipeIngredients,
    RecipeInstructions, Slug, TypeConstraintError,
};
use crate::forms::slug_or_derived;

/// Query string of the public article and recipe listings.
#[derive(Debug, Default, Deserialize)]
pub struct ContentListParams {
    /// Slug of the category to filter by.
    pub category: Option<String>,
    pub page: Option<usize>,
}

#[derive(Deserialize, Validate)]
pub struct AddArticleForm {
    #[validate(range(min = 1))]
    pub category_id: Option<i32>,
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub author: String,
    #[validate(length(min = 1))]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddArticleFormPayload {
    pub category_id: Option<CategoryId>,
    pub title: ContentTitle,
    pub slug: Slug,
    pub author: AuthorName,
    pub body: ArticleBody,
}

impl AddArticleFormPayload {
    pub fn into_new_article(self) -> NewArticle {
        let now = Utc::now().naive_utc();
        NewArticle {
            category_id: self.category_id,
            title: self.title,
            slug: self.slug,
            author: self.author,
            body: self.body,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddArticleFormError {
    #[error("Add article form validation failed: {0}")]
    Validation(String),
    #[error("Add article form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddArticleFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddArticleFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddArticleForm> for AddArticleFormPayload {
    type Error = AddArticleFormError;

    fn try_from(value: AddArticleForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let title = ContentTitle::new(value.title)?;
        let slug = slug_or_derived(value.slug, title.as_str())?;

        Ok(Self {
            category_id: value.category_id.map(CategoryId::new).transpose()?,
            title,
            slug,
            author: AuthorName::new(value.author)?,
            body: ArticleBody::new(value.body)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct AddRecipeForm {
    #[validate(range(min = 1))]
    pub category_id: Option<i32>,
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub author: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub ingredients: String,
    #[validate(length(min = 1))]
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddRecipeFormPayload {
    pub category_id: Option<CategoryId>,
    pub title: ContentTitle,
    pub slug: Slug,
    pub author: AuthorName,
    pub description: RecipeDescription,
    pub ingredients: RecipeIngredients,
    pub instructions: RecipeInstructions,
}

impl AddRecipeFormPayload {
    pub fn into_new_recipe(self) -> NewRecipe {
        let now = Utc::now().naive_utc();
        NewRecipe {
            category_id: self.category_id,
            title: self.title,
            slug: self.slug,
            author: self.author,
            description: self.description,
            ingredients: self.ingredients,
            instructions: self.instructions,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddRecipeFormError {
    #[error("Add recipe form validation failed: {0}")]
    Validation(String),
    #[error("Add recipe form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddRecipeFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddRecipeFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddRecipeForm> for AddRecipeFormPayload {
    type Error = AddRecipeFormError;

    fn try_from(value: AddRecipeForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let title = ContentTitle::new(value.title)?;
        let slug = slug_or_derived(value.slug, title.as_str())?;

        Ok(Self {
            category_id: value.category_id.map(CategoryId::new).transpose()?,
            title,
            slug,
            author: AuthorName::new(value.author)?,
            description: RecipeDescription::new(value.description)?,
            ingredients: RecipeIngredients::new(value.ingredients)?,
            instructions: RecipeInstructions::new(value.instructions)?,
        })
    }
}
