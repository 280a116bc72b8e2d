use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{Category as DomainCategory, NewCategory as DomainNewCategory};
use crate::domain::types::{
    ArticleCount, CategoryId, CategoryName, Slug, TypeConstraintError,
};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i32>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i32>,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    /// Convert into the domain record, attaching the separately counted articles.
    pub fn into_domain(self, article_count: i64) -> Result<DomainCategory, TypeConstraintError> {
        let article_count = i32::try_from(article_count)
            .map_err(|_| TypeConstraintError::InvalidValue("article count overflow".into()))?;

        Ok(DomainCategory {
            id: self.id.try_into()?,
            name: CategoryName::new(self.name)?,
            slug: Slug::new(self.slug)?,
            parent_id: self.parent_id.map(CategoryId::new).transpose()?,
            sort_order: self.sort_order,
            article_count: ArticleCount::new(article_count)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        Self {
            name: category.name.into_inner(),
            slug: category.slug.into_inner(),
            parent_id: category.parent_id.map(|id| id.get()),
            sort_order: category.sort_order,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
