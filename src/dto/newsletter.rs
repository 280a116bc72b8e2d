use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::subscriber::Subscriber;

/// Row of the subscriber CSV export.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscriberCsvRow {
    pub email: String,
    pub active: bool,
    pub subscribed_at: NaiveDateTime,
}

impl From<Subscriber> for SubscriberCsvRow {
    fn from(value: Subscriber) -> Self {
        Self {
            email: value.email.into_inner(),
            active: value.active,
            subscribed_at: value.created_at,
        }
    }
}
