use chrono::Utc;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::publication::{ContentRef, Publication};
use crate::domain::schedule::{
    CalendarMonth, MonthlySchedule, ScheduledEntry, project_month, upcoming,
};
use crate::domain::types::{PublicationId, PublicationStatus};
use crate::forms::schedule::{RescheduleFormPayload, ScheduleContentFormPayload};
use crate::repository::{
    ArticleReader, PublicationListQuery, PublicationReader, PublicationWriter, RecipeReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Upper bound on the size of the public upcoming feed.
pub const MAX_UPCOMING_LIMIT: usize = 50;

fn load_editable<R>(repo: &R, id: PublicationId) -> ServiceResult<Publication>
where
    R: PublicationReader,
{
    let publication = match repo.get_publication_by_id(id) {
        Ok(Some(publication)) => publication,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get publication: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if !publication.is_editable() {
        return Err(already_published());
    }
    Ok(publication)
}

fn already_published() -> ServiceError {
    ServiceError::Form("Published entries can no longer be changed".into())
}

/// Editorial calendar of one month, every status included.
pub fn show_calendar<R>(
    month: CalendarMonth,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<MonthlySchedule>
where
    R: PublicationReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.list_publications(PublicationListQuery::within(&month)) {
        Ok(publications) => Ok(project_month(month, publications)),
        Err(e) => {
            log::error!("Failed to list publications: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Next scheduled publications for the public feed.
///
/// `limit` falls back to `default_limit` and is capped at
/// [`MAX_UPCOMING_LIMIT`].
pub fn show_upcoming<R>(
    limit: Option<usize>,
    default_limit: usize,
    repo: &R,
) -> ServiceResult<Vec<ScheduledEntry>>
where
    R: PublicationReader,
{
    let limit = limit.unwrap_or(default_limit).min(MAX_UPCOMING_LIMIT);
    let now = Utc::now().naive_utc();
    let query = PublicationListQuery::default()
        .starting_at(now)
        .status(PublicationStatus::Scheduled)
        .limit(limit);

    match repo.list_publications(query) {
        Ok(publications) => Ok(upcoming(publications, now, limit)),
        Err(e) => {
            log::error!("Failed to list upcoming publications: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn schedule_content<R>(
    payload: ScheduleContentFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: PublicationWriter + RecipeReader + ArticleReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let exists = match payload.content {
        ContentRef::Recipe(id) => repo.get_recipe_by_id(id).map(|r| r.is_some()),
        ContentRef::Article(id) => repo.get_article_by_id(id).map(|a| a.is_some()),
    };
    match exists {
        Ok(true) => {}
        Ok(false) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get scheduled content: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.create_publication(&payload.into_new_publication()) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to create publication: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn cancel_publication<R>(
    publication_id: PublicationId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: PublicationReader + PublicationWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let publication = load_editable(repo, publication_id)?;

    match repo.cancel_publication(publication.id) {
        Ok(0) => Err(already_published()),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to cancel publication: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Move a scheduled or cancelled publication to a new date; it becomes
/// scheduled again.
pub fn reschedule_publication<R>(
    payload: RescheduleFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: PublicationReader + PublicationWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let publication = load_editable(repo, payload.publication_id)?;

    match repo.reschedule_publication(publication.id, payload.publication_date) {
        Ok(0) => Err(already_published()),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to reschedule publication: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Mark every scheduled publication whose date has passed as published and
/// return how many changed.
pub fn publish_due<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<usize>
where
    R: PublicationWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.publish_due_publications(Utc::now().naive_utc()) {
        Ok(published) => {
            log::info!("Published {published} due publications");
            Ok(published)
        }
        Err(e) => {
            log::error!("Failed to publish due publications: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::Article;
    use crate::domain::types::{
        ArticleBody, ArticleId, AuthorName, ContentKind, ContentTitle, RecipeId, Slug,
    };
    use crate::repository::test::TestRepository;
    use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".into(),
            email: "editor@example.com".into(),
            hub_id: 1,
            name: "Editor".into(),
            roles: vec![SERVICE_ACCESS_ROLE.into()],
            exp: 0,
        }
    }

    fn epoch() -> NaiveDateTime {
        DateTime::from_timestamp(0, 0).unwrap().naive_utc()
    }

    fn publication(id: i32, date: NaiveDateTime, status: PublicationStatus) -> Publication {
        Publication {
            id: PublicationId::new(id).unwrap(),
            publication_date: date,
            status,
            content: ContentRef::Recipe(RecipeId::new(id).unwrap()),
            summary: None,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn march(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn calendar_buckets_month() {
        let repo = TestRepository::new().with_publications(vec![
            publication(1, march(15), PublicationStatus::Scheduled),
            publication(2, march(1), PublicationStatus::Cancelled),
            publication(3, march(1) - Duration::days(1), PublicationStatus::Scheduled),
        ]);
        let month = CalendarMonth::new(2024, 3).unwrap();

        let schedule = show_calendar(month, &sample_user(), &repo).unwrap();
        assert_eq!(schedule.days.len(), 31);
        assert_eq!(schedule.days[14].publications[0].id.get(), 1);
        assert_eq!(schedule.days[0].publications.len(), 1);
        assert_eq!(
            schedule.days[14].publications[0].content_type,
            ContentKind::Recipe
        );
    }

    #[test]
    fn calendar_requires_role() {
        let mut user = sample_user();
        user.roles.clear();
        let repo = TestRepository::new();

        let err = show_calendar(CalendarMonth::new(2024, 3).unwrap(), &user, &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[test]
    fn upcoming_feed_skips_past_and_cancelled() {
        let now = Utc::now().naive_utc();
        let repo = TestRepository::new().with_publications(vec![
            publication(1, now + Duration::days(2), PublicationStatus::Scheduled),
            publication(2, now - Duration::days(1), PublicationStatus::Scheduled),
            publication(3, now + Duration::days(1), PublicationStatus::Cancelled),
            publication(4, now + Duration::days(1), PublicationStatus::Scheduled),
        ]);

        let feed = show_upcoming(None, 5, &repo).unwrap();
        let ids: Vec<i32> = feed.iter().map(|entry| entry.id.get()).collect();
        assert_eq!(ids, vec![4, 1]);

        let feed = show_upcoming(Some(1), 5, &repo).unwrap();
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn scheduling_requires_existing_content() {
        let repo = TestRepository::new();
        let payload = ScheduleContentFormPayload {
            content: ContentRef::Recipe(RecipeId::new(1).unwrap()),
            publication_date: march(2),
        };

        let err = schedule_content(payload, &sample_user(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn schedules_existing_article() {
        let repo = TestRepository::new().with_articles(vec![Article {
            id: ArticleId::new(1).unwrap(),
            category_id: None,
            title: ContentTitle::new("Knife skills").unwrap(),
            slug: Slug::new("knife-skills").unwrap(),
            author: AuthorName::new("Ann").unwrap(),
            body: ArticleBody::new("Body").unwrap(),
            created_at: epoch(),
            updated_at: epoch(),
        }]);
        let payload = ScheduleContentFormPayload {
            content: ContentRef::Article(ArticleId::new(1).unwrap()),
            publication_date: march(2),
        };

        schedule_content(payload, &sample_user(), &repo).unwrap();
        let stored = repo.publications();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, PublicationStatus::Scheduled);
    }

    #[test]
    fn published_entries_are_frozen() {
        let repo = TestRepository::new().with_publications(vec![publication(
            1,
            march(2),
            PublicationStatus::Published,
        )]);
        let id = PublicationId::new(1).unwrap();

        let err = cancel_publication(id, &sample_user(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));

        let payload = RescheduleFormPayload {
            publication_id: id,
            publication_date: march(20),
        };
        let err = reschedule_publication(payload, &sample_user(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[test]
    fn cancelled_entry_can_be_rescheduled() {
        let repo = TestRepository::new().with_publications(vec![publication(
            1,
            march(2),
            PublicationStatus::Scheduled,
        )]);
        let id = PublicationId::new(1).unwrap();

        cancel_publication(id, &sample_user(), &repo).unwrap();
        assert_eq!(repo.publications()[0].status, PublicationStatus::Cancelled);

        let payload = RescheduleFormPayload {
            publication_id: id,
            publication_date: march(20),
        };
        reschedule_publication(payload, &sample_user(), &repo).unwrap();
        let stored = &repo.publications()[0];
        assert_eq!(stored.status, PublicationStatus::Scheduled);
        assert_eq!(stored.publication_date, march(20));
    }

    #[test]
    fn publish_due_only_touches_past_scheduled() {
        let now = Utc::now().naive_utc();
        let repo = TestRepository::new().with_publications(vec![
            publication(1, now - Duration::hours(1), PublicationStatus::Scheduled),
            publication(2, now + Duration::hours(1), PublicationStatus::Scheduled),
            publication(3, now - Duration::hours(1), PublicationStatus::Cancelled),
        ]);

        assert_eq!(publish_due(&sample_user(), &repo).unwrap(), 1);
        let statuses: Vec<PublicationStatus> =
            repo.publications().iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![
                PublicationStatus::Published,
                PublicationStatus::Scheduled,
                PublicationStatus::Cancelled
            ]
        );
    }
}
