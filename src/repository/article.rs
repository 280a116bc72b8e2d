use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::article::{Article, NewArticle};
use crate::domain::types::{ArticleId, Slug};
use crate::models::article::{Article as DbArticle, NewArticle as DbNewArticle};
use crate::repository::{
    ArticleReader, ArticleWriter, ContentListQuery, DieselRepository, page_window,
    unique_violation,
};

impl ArticleReader for DieselRepository {
    fn list_articles(&self, query: ContentListQuery) -> RepositoryResult<(usize, Vec<Article>)> {
        use crate::schema::articles;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = articles::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(category_id) = query.category_id {
                items = items.filter(articles::category_id.eq(Some(category_id.get())));
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
            .order((articles::created_at.desc(), articles::id.desc()))
            .load::<DbArticle>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Article>, _>>()?;

        Ok((total, items))
    }

    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>> {
        use crate::schema::articles;

        let mut conn = self.conn()?;

        let article = articles::table
            .filter(articles::id.eq(id.get()))
            .first::<DbArticle>(&mut conn)
            .optional()?;

        let article = article.map(TryInto::try_into).transpose()?;
        Ok(article)
    }

    fn get_article_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Article>> {
        use crate::schema::articles;

        let mut conn = self.conn()?;

        let article = articles::table
            .filter(articles::slug.eq(slug.as_str()))
            .first::<DbArticle>(&mut conn)
            .optional()?;

        let article = article.map(TryInto::try_into).transpose()?;
        Ok(article)
    }
}

impl ArticleWriter for DieselRepository {
    fn create_article(&self, article: &NewArticle) -> RepositoryResult<Article> {
        use crate::schema::articles;

        let mut conn = self.conn()?;
        let db_article: DbNewArticle = article.into();

        let created = diesel::insert_into(articles::table)
            .values(&db_article)
            .get_result::<DbArticle>(&mut conn)
            .map_err(|e| unique_violation(e, "Article slug"))?;

        Ok(created.try_into()?)
    }
}
