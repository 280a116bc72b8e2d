use chrono::Utc;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::subscriber::{NewSubscriber, Subscriber};
use crate::dto::newsletter::SubscriberCsvRow;
use crate::forms::newsletter::NewsletterFormPayload;
use crate::repository::{SubscriberReader, SubscriberWriter};
use crate::services::{ServiceError, ServiceResult};

/// Subscribe an address. Repeated calls are harmless and an unsubscribed
/// address is reactivated.
pub fn subscribe<R>(payload: NewsletterFormPayload, repo: &R) -> ServiceResult<()>
where
    R: SubscriberWriter,
{
    let now = Utc::now().naive_utc();
    let subscriber = NewSubscriber {
        email: payload.email,
        created_at: now,
        updated_at: now,
    };

    match repo.upsert_subscriber(&subscriber) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to subscribe: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deactivate a subscription. Unknown addresses are accepted silently so the
/// endpoint does not reveal who is subscribed.
pub fn unsubscribe<R>(payload: NewsletterFormPayload, repo: &R) -> ServiceResult<()>
where
    R: SubscriberWriter,
{
    match repo.set_subscriber_active(&payload.email, false) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to unsubscribe: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_subscribers<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<Subscriber>>
where
    R: SubscriberReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.list_subscribers(false) {
        Ok(subscribers) => Ok(subscribers),
        Err(e) => {
            log::error!("Failed to list subscribers: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Active subscribers as CSV with a header row.
pub fn export_subscribers_csv<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<String>
where
    R: SubscriberReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let subscribers = match repo.list_subscribers(true) {
        Ok(subscribers) => subscribers,
        Err(e) => {
            log::error!("Failed to list subscribers: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    for subscriber in subscribers {
        writer
            .serialize(SubscriberCsvRow::from(subscriber))
            .map_err(|e| {
                log::error!("Failed to write subscriber row: {e}");
                ServiceError::Internal
            })?;
    }

    let bytes = writer.into_inner().map_err(|e| {
        log::error!("Failed to flush subscriber export: {e}");
        ServiceError::Internal
    })?;
    String::from_utf8(bytes).map_err(|e| {
        log::error!("Subscriber export is not valid UTF-8: {e}");
        ServiceError::Internal
    })
}
