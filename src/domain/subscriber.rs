use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{SubscriberEmail, SubscriberId};

/// Newsletter subscription. Unsubscribing keeps the row but clears `active`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: SubscriberEmail,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Subscriber`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
