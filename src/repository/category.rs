use std::collections::HashMap;

use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::types::{CategoryId, Slug};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, unique_violation};

/// Number of articles per category id.
fn article_counts(conn: &mut SqliteConnection) -> QueryResult<HashMap<i32, i64>> {
    use crate::schema::articles;

    let counts = articles::table
        .filter(articles::category_id.is_not_null())
        .group_by(articles::category_id)
        .select((articles::category_id, diesel::dsl::count_star()))
        .load::<(Option<i32>, i64)>(conn)?;

    Ok(counts
        .into_iter()
        .filter_map(|(category_id, count)| category_id.map(|id| (id, count)))
        .collect())
}

fn count_articles(conn: &mut SqliteConnection, category_id: i32) -> QueryResult<i64> {
    use crate::schema::articles;

    articles::table
        .filter(articles::category_id.eq(Some(category_id)))
        .count()
        .get_result::<i64>(conn)
}

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let counts = article_counts(&mut conn)?;
        let items = categories::table
            .order((categories::sort_order.asc(), categories::id.asc()))
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(|category| {
                let count = counts.get(&category.id).copied().unwrap_or(0);
                category.into_domain(count)
            })
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        match category {
            Some(category) => {
                let count = count_articles(&mut conn, category.id)?;
                Ok(Some(category.into_domain(count)?))
            }
            None => Ok(None),
        }
    }

    fn get_category_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug.as_str()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        match category {
            Some(category) => {
                let count = count_articles(&mut conn, category.id)?;
                Ok(Some(category.into_domain(count)?))
            }
            None => Ok(None),
        }
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let affected = diesel::insert_into(categories::table)
            .values(db_category)
            .execute(&mut conn)
            .map_err(|e| unique_violation(e, "Category slug"))?;

        Ok(affected)
    }

    fn update_category(&self, id: CategoryId, update: &CategoryUpdate) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::update(categories::table.filter(categories::id.eq(id.get())))
            .set((
                categories::name.eq(update.name.as_str()),
                categories::slug.eq(update.slug.as_str()),
                categories::parent_id.eq(update.parent_id.map(|parent| parent.get())),
                categories::sort_order.eq(update.sort_order),
                categories::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .map_err(|e| unique_violation(e, "Category slug"))?;

        Ok(affected)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::{articles, categories, recipes};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let parent_id = categories::table
                .filter(categories::id.eq(id.get()))
                .select(categories::parent_id)
                .first::<Option<i32>>(conn)
                .optional()?;
            let Some(parent_id) = parent_id else {
                return Ok(0);
            };

            diesel::update(categories::table.filter(categories::parent_id.eq(Some(id.get()))))
                .set((
                    categories::parent_id.eq(parent_id),
                    categories::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;

            diesel::update(articles::table.filter(articles::category_id.eq(Some(id.get()))))
                .set(articles::category_id.eq(None::<i32>))
                .execute(conn)?;

            diesel::update(recipes::table.filter(recipes::category_id.eq(Some(id.get()))))
                .set(recipes::category_id.eq(None::<i32>))
                .execute(conn)?;

            diesel::delete(categories::table.filter(categories::id.eq(id.get()))).execute(conn)
        })?;

        Ok(affected)
    }
}
