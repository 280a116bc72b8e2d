use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::publication::{
    ContentRef, ContentSummary, NewPublication as DomainNewPublication,
    Publication as DomainPublication,
};
use crate::domain::types::{PublicationStatus, TypeConstraintError};

/// Diesel model representing the `publications` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::publications)]
pub struct Publication {
    pub id: i32,
    pub recipe_id: Option<i32>,
    pub article_id: Option<i32>,
    pub publication_date: NaiveDateTime,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Publication`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::publications)]
pub struct NewPublication {
    pub recipe_id: Option<i32>,
    pub article_id: Option<i32>,
    pub publication_date: NaiveDateTime,
    pub status: &'static str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Publication {
    /// Convert into the domain record with the resolved content summary.
    pub fn into_domain(
        self,
        summary: Option<ContentSummary>,
    ) -> Result<DomainPublication, TypeConstraintError> {
        Ok(DomainPublication {
            id: self.id.try_into()?,
            publication_date: self.publication_date,
            status: PublicationStatus::try_from(self.status)?,
            content: ContentRef::from_columns(self.recipe_id, self.article_id)?,
            summary,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<&DomainNewPublication> for NewPublication {
    fn from(publication: &DomainNewPublication) -> Self {
        Self {
            recipe_id: publication.content.recipe_id().map(|id| id.get()),
            article_id: publication.content.article_id().map(|id| id.get()),
            publication_date: publication.publication_date,
            status: publication.status.as_str(),
            created_at: publication.created_at,
            updated_at: publication.updated_at,
        }
    }
}
