use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::publication::{ContentSummary, NewPublication, Publication};
use crate::domain::types::{AuthorName, ContentTitle, PublicationId, PublicationStatus};
use crate::models::publication::{
    NewPublication as DbNewPublication, Publication as DbPublication,
};
use crate::repository::{
    DieselRepository, PublicationListQuery, PublicationReader, PublicationWriter,
};

/// Attach the title and author of the referenced recipe or article to each row.
fn resolve_summaries(
    conn: &mut SqliteConnection,
    rows: Vec<DbPublication>,
) -> RepositoryResult<Vec<Publication>> {
    use crate::schema::{articles, recipes};

    let recipe_ids: Vec<i32> = rows.iter().filter_map(|row| row.recipe_id).collect();
    let article_ids: Vec<i32> = rows.iter().filter_map(|row| row.article_id).collect();

    let recipe_titles: HashMap<i32, (String, String)> = recipes::table
        .filter(recipes::id.eq_any(recipe_ids))
        .select((recipes::id, recipes::title, recipes::author))
        .load::<(i32, String, String)>(conn)?
        .into_iter()
        .map(|(id, title, author)| (id, (title, author)))
        .collect();

    let article_titles: HashMap<i32, (String, String)> = articles::table
        .filter(articles::id.eq_any(article_ids))
        .select((articles::id, articles::title, articles::author))
        .load::<(i32, String, String)>(conn)?
        .into_iter()
        .map(|(id, title, author)| (id, (title, author)))
        .collect();

    let mut publications = Vec::with_capacity(rows.len());
    for row in rows {
        let resolved = match (row.recipe_id, row.article_id) {
            (Some(recipe_id), None) => recipe_titles.get(&recipe_id),
            (None, Some(article_id)) => article_titles.get(&article_id),
            _ => None,
        };
        let summary = match resolved {
            Some((title, author)) => Some(ContentSummary {
                title: ContentTitle::new(title.as_str())?,
                author: AuthorName::new(author.as_str())?,
            }),
            None => None,
        };
        publications.push(row.into_domain(summary)?);
    }

    Ok(publications)
}

impl PublicationReader for DieselRepository {
    fn list_publications(&self, query: PublicationListQuery) -> RepositoryResult<Vec<Publication>> {
        use crate::schema::publications;

        let mut conn = self.conn()?;

        let mut items = publications::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(from) = query.from {
            items = items.filter(publications::publication_date.ge(from));
        }
        if let Some(until) = query.until {
            items = items.filter(publications::publication_date.lt(until));
        }
        if let Some(status) = query.status {
            items = items.filter(publications::status.eq(status.as_str()));
        }
        items = items.order((
            publications::publication_date.asc(),
            publications::id.asc(),
        ));
        if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        let rows = items.load::<DbPublication>(&mut conn)?;
        resolve_summaries(&mut conn, rows)
    }

    fn get_publication_by_id(&self, id: PublicationId) -> RepositoryResult<Option<Publication>> {
        use crate::schema::publications;

        let mut conn = self.conn()?;

        let row = publications::table
            .filter(publications::id.eq(id.get()))
            .first::<DbPublication>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(resolve_summaries(&mut conn, vec![row])?.pop())
    }
}

impl PublicationWriter for DieselRepository {
    fn create_publication(&self, publication: &NewPublication) -> RepositoryResult<usize> {
        use crate::schema::publications;

        let mut conn = self.conn()?;
        let db_publication: DbNewPublication = publication.into();

        let affected = diesel::insert_into(publications::table)
            .values(&db_publication)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn cancel_publication(&self, id: PublicationId) -> RepositoryResult<usize> {
        use crate::schema::publications;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            publications::table
                .filter(publications::id.eq(id.get()))
                .filter(publications::status.ne(PublicationStatus::Published.as_str())),
        )
        .set((
            publications::status.eq(PublicationStatus::Cancelled.as_str()),
            publications::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn reschedule_publication(
        &self,
        id: PublicationId,
        publication_date: NaiveDateTime,
    ) -> RepositoryResult<usize> {
        use crate::schema::publications;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            publications::table
                .filter(publications::id.eq(id.get()))
                .filter(publications::status.ne(PublicationStatus::Published.as_str())),
        )
        .set((
            publications::publication_date.eq(publication_date),
            publications::status.eq(PublicationStatus::Scheduled.as_str()),
            publications::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn publish_due_publications(&self, now: NaiveDateTime) -> RepositoryResult<usize> {
        use crate::schema::publications;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            publications::table
                .filter(publications::status.eq(PublicationStatus::Scheduled.as_str()))
                .filter(publications::publication_date.le(now)),
        )
        .set((
            publications::status.eq(PublicationStatus::Published.as_str()),
            publications::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
