use chrono::NaiveDateTime;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::pagination::Pagination;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};
use crate::domain::article::{Article, NewArticle};
use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::publication::{NewPublication, Publication};
use crate::domain::recipe::{NewRecipe, Recipe};
use crate::domain::schedule::CalendarMonth;
use crate::domain::subscriber::{NewSubscriber, Subscriber};
use crate::domain::types::{
    ArticleId, CategoryId, CommentId, CommentStatus, PublicationId, PublicationStatus, RecipeId,
    RejectionReason, Slug, SubscriberEmail,
};

pub mod article;
pub mod category;
pub mod comment;
pub mod publication;
pub mod recipe;
pub mod subscriber;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Report a unique constraint violation as a validation error naming the
/// taken value; any other failure is passed through.
fn unique_violation(err: DieselError, taken: &str) -> RepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RepositoryError::ValidationError(format!("{taken} is already in use"))
        }
        other => other.into(),
    }
}

/// Rows to skip and take for a 1-indexed page.
fn page_window(pagination: &Pagination) -> (i64, i64) {
    let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
    (offset, pagination.per_page as i64)
}

/// Query parameters used when listing articles or recipes.
#[derive(Debug, Clone, Default)]
pub struct ContentListQuery {
    /// Restrict to content filed under a category.
    pub category_id: Option<CategoryId>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ContentListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters used when listing publications.
///
/// Results are always ordered by ascending publication date.
#[derive(Debug, Clone, Default)]
pub struct PublicationListQuery {
    /// Inclusive lower bound on the publication date.
    pub from: Option<NaiveDateTime>,
    /// Exclusive upper bound on the publication date.
    pub until: Option<NaiveDateTime>,
    pub status: Option<PublicationStatus>,
    pub limit: Option<usize>,
}

impl PublicationListQuery {
    /// Publications dated within `month`.
    pub fn within(month: &CalendarMonth) -> Self {
        Self {
            from: Some(month.start()),
            until: Some(month.end()),
            ..Self::default()
        }
    }
    pub fn starting_at(mut self, from: NaiveDateTime) -> Self {
        self.from = Some(from);
        self
    }
    pub fn status(mut self, status: PublicationStatus) -> Self {
        self.status = Some(status);
        self
    }
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Query parameters used when listing comments.
#[derive(Debug, Clone, Default)]
pub struct CommentListQuery {
    pub article_id: Option<ArticleId>,
    pub status: Option<CommentStatus>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl CommentListQuery {
    pub fn article(mut self, article_id: ArticleId) -> Self {
        self.article_id = Some(article_id);
        self
    }
    pub fn status(mut self, status: CommentStatus) -> Self {
        self.status = Some(status);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category with its article count, ordered by `sort_order`.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category by its slug.
    fn get_category_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<usize>;
    /// Overwrite the editable fields of a category.
    fn update_category(&self, id: CategoryId, update: &CategoryUpdate) -> RepositoryResult<usize>;
    /// Delete a category, moving its children up one level and detaching its
    /// articles and recipes.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for article entities.
pub trait ArticleReader {
    /// List articles matching the query, newest first, with the total count.
    fn list_articles(&self, query: ContentListQuery) -> RepositoryResult<(usize, Vec<Article>)>;
    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>>;
    fn get_article_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Article>>;
}

/// Write operations for article entities.
pub trait ArticleWriter {
    /// Persist a new article and return it.
    fn create_article(&self, article: &NewArticle) -> RepositoryResult<Article>;
}

/// Read-only operations for recipe entities.
pub trait RecipeReader {
    /// List recipes matching the query, newest first, with the total count.
    fn list_recipes(&self, query: ContentListQuery) -> RepositoryResult<(usize, Vec<Recipe>)>;
    fn get_recipe_by_id(&self, id: RecipeId) -> RepositoryResult<Option<Recipe>>;
    fn get_recipe_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Recipe>>;
}

/// Write operations for recipe entities.
pub trait RecipeWriter {
    /// Persist a new recipe and return it.
    fn create_recipe(&self, recipe: &NewRecipe) -> RepositoryResult<Recipe>;
}

/// Read-only operations for publication entities.
pub trait PublicationReader {
    /// List publications with their content title and author resolved.
    fn list_publications(&self, query: PublicationListQuery) -> RepositoryResult<Vec<Publication>>;
    fn get_publication_by_id(&self, id: PublicationId) -> RepositoryResult<Option<Publication>>;
}

/// Write operations for publication entities.
pub trait PublicationWriter {
    /// Persist a new publication.
    fn create_publication(&self, publication: &NewPublication) -> RepositoryResult<usize>;
    /// Cancel a publication that has not been published yet. Returns the
    /// number of rows changed, zero for a missing or published entry.
    fn cancel_publication(&self, id: PublicationId) -> RepositoryResult<usize>;
    /// Move an unpublished publication to a new date and mark it scheduled.
    /// Returns zero for a missing or published entry.
    fn reschedule_publication(
        &self,
        id: PublicationId,
        publication_date: NaiveDateTime,
    ) -> RepositoryResult<usize>;
    /// Mark every scheduled publication dated at or before `now` as published.
    fn publish_due_publications(&self, now: NaiveDateTime) -> RepositoryResult<usize>;
}

/// Read-only operations for comment entities.
pub trait CommentReader {
    /// List comments matching the query, oldest first, with the total count.
    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<(usize, Vec<Comment>)>;
    fn get_comment_by_id(&self, id: CommentId) -> RepositoryResult<Option<Comment>>;
}

/// Write operations for comment entities.
pub trait CommentWriter {
    /// Persist a new pending comment.
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<usize>;
    /// Count a reader report and flag a pending comment once it reaches
    /// [`FLAG_THRESHOLD`](crate::domain::comment::FLAG_THRESHOLD) reports.
    /// Returns the stored comment afterwards, `None` if it does not exist.
    fn report_comment(&self, id: CommentId) -> RepositoryResult<Option<Comment>>;
    /// Approve a pending or flagged comment. Returns zero when the comment is
    /// missing or already approved or rejected.
    fn approve_comment(&self, id: CommentId) -> RepositoryResult<usize>;
    /// Reject a pending or flagged comment. Returns zero when the comment is
    /// missing or already approved or rejected.
    fn reject_comment(&self, id: CommentId, reason: &RejectionReason) -> RepositoryResult<usize>;
}

/// Read-only operations for newsletter subscribers.
pub trait SubscriberReader {
    /// List subscribers in sign-up order.
    fn list_subscribers(&self, active_only: bool) -> RepositoryResult<Vec<Subscriber>>;
    fn get_subscriber_by_email(
        &self,
        email: &SubscriberEmail,
    ) -> RepositoryResult<Option<Subscriber>>;
}

/// Write operations for newsletter subscribers.
pub trait SubscriberWriter {
    /// Persist an active subscriber, reactivating the address if it is
    /// already on the list.
    fn upsert_subscriber(&self, subscriber: &NewSubscriber) -> RepositoryResult<usize>;
    /// Activate or deactivate a subscription.
    fn set_subscriber_active(
        &self,
        email: &SubscriberEmail,
        active: bool,
    ) -> RepositoryResult<usize>;
}
