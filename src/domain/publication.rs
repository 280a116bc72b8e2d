use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ArticleId, AuthorName, ContentKind, ContentTitle, PublicationId, PublicationStatus, RecipeId,
    TypeConstraintError,
};

/// The single piece of content a publication puts on the calendar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ContentRef {
    Recipe(RecipeId),
    Article(ArticleId),
}

impl ContentRef {
    /// Build a reference from the two nullable foreign keys used in storage.
    ///
    /// Exactly one of them must be set.
    pub fn from_columns(
        recipe_id: Option<i32>,
        article_id: Option<i32>,
    ) -> Result<Self, TypeConstraintError> {
        match (recipe_id, article_id) {
            (Some(recipe_id), None) => Ok(Self::Recipe(RecipeId::new(recipe_id)?)),
            (None, Some(article_id)) => Ok(Self::Article(ArticleId::new(article_id)?)),
            _ => Err(TypeConstraintError::AmbiguousContentRef),
        }
    }

    pub const fn kind(self) -> ContentKind {
        match self {
            Self::Recipe(_) => ContentKind::Recipe,
            Self::Article(_) => ContentKind::Article,
        }
    }

    /// Raw identifier of the referenced recipe or article.
    pub const fn content_id(self) -> i32 {
        match self {
            Self::Recipe(id) => id.get(),
            Self::Article(id) => id.get(),
        }
    }

    pub const fn recipe_id(self) -> Option<RecipeId> {
        match self {
            Self::Recipe(id) => Some(id),
            Self::Article(_) => None,
        }
    }

    pub const fn article_id(self) -> Option<ArticleId> {
        match self {
            Self::Article(id) => Some(id),
            Self::Recipe(_) => None,
        }
    }
}

/// Title and author of the content a publication points at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentSummary {
    pub title: ContentTitle,
    pub author: AuthorName,
}

/// A recipe or article placed on the publishing calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Publication {
    pub id: PublicationId,
    pub publication_date: NaiveDateTime,
    pub status: PublicationStatus,
    pub content: ContentRef,
    /// `None` when the referenced content no longer exists.
    pub summary: Option<ContentSummary>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Publication`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPublication {
    pub content: ContentRef,
    pub publication_date: NaiveDateTime,
    pub status: PublicationStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Publication {
    /// Whether editors may still cancel or move this publication.
    pub fn is_editable(&self) -> bool {
        self.status != PublicationStatus::Published
    }

    /// Whether the publication should go live at `now`.
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.status == PublicationStatus::Scheduled && self.publication_date <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_ref_requires_exactly_one_column() {
        assert_eq!(
            ContentRef::from_columns(Some(3), None).unwrap(),
            ContentRef::Recipe(RecipeId::new(3).unwrap())
        );
        assert_eq!(
            ContentRef::from_columns(None, Some(4)).unwrap(),
            ContentRef::Article(ArticleId::new(4).unwrap())
        );
        assert_eq!(
            ContentRef::from_columns(Some(1), Some(2)).unwrap_err(),
            TypeConstraintError::AmbiguousContentRef
        );
        assert_eq!(
            ContentRef::from_columns(None, None).unwrap_err(),
            TypeConstraintError::AmbiguousContentRef
        );
    }

    #[test]
    fn content_ref_derives_kind() {
        let recipe = ContentRef::Recipe(RecipeId::new(1).unwrap());
        let article = ContentRef::Article(ArticleId::new(1).unwrap());

        assert_eq!(recipe.kind(), ContentKind::Recipe);
        assert_eq!(article.kind(), ContentKind::Article);
        assert_eq!(recipe.article_id(), None);
    }

    #[test]
    fn content_ref_serializes_as_tagged_object() {
        let value =
            serde_json::to_value(ContentRef::Article(ArticleId::new(9).unwrap())).unwrap();
        assert_eq!(value, serde_json::json!({ "type": "article", "id": 9 }));
    }
}
