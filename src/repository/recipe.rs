use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::recipe::{NewRecipe, Recipe};
use crate::domain::types::{RecipeId, Slug};
use crate::models::recipe::{NewRecipe as DbNewRecipe, Recipe as DbRecipe};
use crate::repository::{
    ContentListQuery, DieselRepository, RecipeReader, RecipeWriter, page_window,
    unique_violation,
};

impl RecipeReader for DieselRepository {
    fn list_recipes(&self, query: ContentListQuery) -> RepositoryResult<(usize, Vec<Recipe>)> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = recipes::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(category_id) = query.category_id {
                items = items.filter(recipes::category_id.eq(Some(category_id.get())));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_window(pagination);
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .order((recipes::created_at.desc(), recipes::id.desc()))
            .load::<DbRecipe>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Recipe>, _>>()?;

        Ok((total, items))
    }

    fn get_recipe_by_id(&self, id: RecipeId) -> RepositoryResult<Option<Recipe>> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;

        let recipe = recipes::table
            .filter(recipes::id.eq(id.get()))
            .first::<DbRecipe>(&mut conn)
            .optional()?;

        let recipe = recipe.map(TryInto::try_into).transpose()?;
        Ok(recipe)
    }

    fn get_recipe_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Recipe>> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;

        let recipe = recipes::table
            .filter(recipes::slug.eq(slug.as_str()))
            .first::<DbRecipe>(&mut conn)
            .optional()?;

        let recipe = recipe.map(TryInto::try_into).transpose()?;
        Ok(recipe)
    }
}

impl RecipeWriter for DieselRepository {
    fn create_recipe(&self, recipe: &NewRecipe) -> RepositoryResult<Recipe> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;
        let db_recipe: DbNewRecipe = recipe.into();

        let created = diesel::insert_into(recipes::table)
            .values(&db_recipe)
            .get_result::<DbRecipe>(&mut conn)
            .map_err(|e| unique_violation(e, "Recipe slug"))?;

        Ok(created.try_into()?)
    }
}
