use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::subscriber::{
    NewSubscriber as DomainNewSubscriber, Subscriber as DomainSubscriber,
};
use crate::domain::types::{SubscriberEmail, TypeConstraintError};

/// Diesel model representing the `subscribers` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::subscribers)]
pub struct Subscriber {
    pub id: i32,
    pub email: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Subscriber`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::subscribers)]
pub struct NewSubscriber<'a> {
    pub email: &'a str,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Subscriber> for DomainSubscriber {
    type Error = TypeConstraintError;

    fn try_from(subscriber: Subscriber) -> Result<Self, Self::Error> {
        Ok(Self {
            id: subscriber.id.try_into()?,
            email: SubscriberEmail::new(subscriber.email)?,
            active: subscriber.active,
            created_at: subscriber.created_at,
            updated_at: subscriber.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewSubscriber> for NewSubscriber<'a> {
    fn from(subscriber: &'a DomainNewSubscriber) -> Self {
        Self {
            email: subscriber.email.as_str(),
            active: true,
            created_at: subscriber.created_at,
            updated_at: subscriber.updated_at,
        }
    }
}
