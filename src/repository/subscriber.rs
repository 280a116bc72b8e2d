use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::subscriber::{NewSubscriber, Subscriber};
use crate::domain::types::SubscriberEmail;
use crate::models::subscriber::{NewSubscriber as DbNewSubscriber, Subscriber as DbSubscriber};
use crate::repository::{DieselRepository, SubscriberReader, SubscriberWriter};

impl SubscriberReader for DieselRepository {
    fn list_subscribers(&self, active_only: bool) -> RepositoryResult<Vec<Subscriber>> {
        use crate::schema::subscribers;

        let mut conn = self.conn()?;

        let mut items = subscribers::table.into_boxed::<diesel::sqlite::Sqlite>();
        if active_only {
            items = items.filter(subscribers::active.eq(true));
        }

        let items = items
            .order((subscribers::created_at.asc(), subscribers::id.asc()))
            .load::<DbSubscriber>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Subscriber>, _>>()?;

        Ok(items)
    }

    fn get_subscriber_by_email(
        &self,
        email: &SubscriberEmail,
    ) -> RepositoryResult<Option<Subscriber>> {
        use crate::schema::subscribers;

        let mut conn = self.conn()?;

        let subscriber = subscribers::table
            .filter(subscribers::email.eq(email.as_str()))
            .first::<DbSubscriber>(&mut conn)
            .optional()?;

        let subscriber = subscriber.map(TryInto::try_into).transpose()?;
        Ok(subscriber)
    }
}

impl SubscriberWriter for DieselRepository {
    fn upsert_subscriber(&self, subscriber: &NewSubscriber) -> RepositoryResult<usize> {
        use crate::schema::subscribers;

        let mut conn = self.conn()?;
        let db_subscriber: DbNewSubscriber = subscriber.into();

        let affected = diesel::insert_into(subscribers::table)
            .values(&db_subscriber)
            .on_conflict(subscribers::email)
            .do_update()
            .set((
                subscribers::active.eq(true),
                subscribers::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_subscriber_active(
        &self,
        email: &SubscriberEmail,
        active: bool,
    ) -> RepositoryResult<usize> {
        use crate::schema::subscribers;

        let mut conn = self.conn()?;

        let affected =
            diesel::update(subscribers::table.filter(subscribers::email.eq(email.as_str())))
                .set((
                    subscribers::active.eq(active),
                    subscribers::updated_at.eq(diesel::dsl::now),
                ))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
