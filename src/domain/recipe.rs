use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AuthorName, CategoryId, ContentTitle, RecipeDescription, RecipeId, RecipeIngredients,
    RecipeInstructions, Slug,
};

/// A published recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub category_id: Option<CategoryId>,
    pub title: ContentTitle,
    pub slug: Slug,
    pub author: AuthorName,
    pub description: RecipeDescription,
    pub ingredients: RecipeIngredients,
    pub instructions: RecipeInstructions,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Recipe`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRecipe {
    pub category_id: Option<CategoryId>,
    pub title: ContentTitle,
    pub slug: Slug,
    pub author: AuthorName,
    pub description: RecipeDescription,
    pub ingredients: RecipeIngredients,
    pub instructions: RecipeInstructions,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
