use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::article::{Article as DomainArticle, NewArticle as DomainNewArticle};
use crate::domain::types::{
    ArticleBody, AuthorName, CategoryId, ContentTitle, Slug, TypeConstraintError,
};

/// Diesel model representing the `articles` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::articles)]
pub struct Article {
    pub id: i32,
    pub category_id: Option<i32>,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Article`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::articles)]
pub struct NewArticle<'a> {
    pub category_id: Option<i32>,
    pub title: &'a str,
    pub slug: &'a str,
    pub author: &'a str,
    pub body: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Article> for DomainArticle {
    type Error = TypeConstraintError;

    fn try_from(article: Article) -> Result<Self, Self::Error> {
        Ok(Self {
            id: article.id.try_into()?,
            category_id: article.category_id.map(CategoryId::new).transpose()?,
            title: ContentTitle::new(article.title)?,
            slug: Slug::new(article.slug)?,
            author: AuthorName::new(article.author)?,
            body: ArticleBody::new(article.body)?,
            created_at: article.created_at,
            updated_at: article.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewArticle> for NewArticle<'a> {
    fn from(article: &'a DomainNewArticle) -> Self {
        Self {
            category_id: article.category_id.map(|id| id.get()),
            title: article.title.as_str(),
            slug: article.slug.as_str(),
            author: article.author.as_str(),
            body: article.body.as_str(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
