use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recipe::{NewRecipe as DomainNewRecipe, Recipe as DomainRecipe};
use crate::domain::types::{
    AuthorName, CategoryId, ContentTitle, RecipeDescription, RecipeIngredients,
    RecipeInstructions, Slug, TypeConstraintError,
};

/// Diesel model representing the `recipes` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct Recipe {
    pub id: i32,
    pub category_id: Option<i32>,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Recipe`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub category_id: Option<i32>,
    pub title: &'a str,
    pub slug: &'a str,
    pub author: &'a str,
    pub description: &'a str,
    pub ingredients: &'a str,
    pub instructions: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Recipe> for DomainRecipe {
    type Error = TypeConstraintError;

    fn try_from(recipe: Recipe) -> Result<Self, Self::Error> {
        Ok(Self {
            id: recipe.id.try_into()?,
            category_id: recipe.category_id.map(CategoryId::new).transpose()?,
            title: ContentTitle::new(recipe.title)?,
            slug: Slug::new(recipe.slug)?,
            author: AuthorName::new(recipe.author)?,
            description: RecipeDescription::new(recipe.description)?,
            ingredients: RecipeIngredients::new(recipe.ingredients)?,
            instructions: RecipeInstructions::new(recipe.instructions)?,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewRecipe> for NewRecipe<'a> {
    fn from(recipe: &'a DomainNewRecipe) -> Self {
        Self {
            category_id: recipe.category_id.map(|id| id.get()),
            title: recipe.title.as_str(),
            slug: recipe.slug.as_str(),
            author: recipe.author.as_str(),
            description: recipe.description.as_str(),
            ingredients: recipe.ingredients.as_str(),
            instructions: recipe.instructions.as_str(),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}
