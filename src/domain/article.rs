use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ArticleBody, ArticleId, AuthorName, CategoryId, ContentTitle, Slug};

/// A blog article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub category_id: Option<CategoryId>,
    pub title: ContentTitle,
    pub slug: Slug,
    pub author: AuthorName,
    pub body: ArticleBody,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Article`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewArticle {
    pub category_id: Option<CategoryId>,
    pub title: ContentTitle,
    pub slug: Slug,
    pub author: AuthorName,
    pub body: ArticleBody,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
