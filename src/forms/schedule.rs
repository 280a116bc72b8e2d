use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::publication::{ContentRef, NewPublication};
use crate::domain::schedule::CalendarMonth;
use crate::domain::types::{
    ArticleId, ContentKind, PublicationId, PublicationStatus, RecipeId, TypeConstraintError,
};

/// Query string of the admin calendar.
#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    pub year: i32,
    pub month: u32,
}

impl TryFrom<CalendarParams> for CalendarMonth {
    type Error = TypeConstraintError;

    fn try_from(value: CalendarParams) -> Result<Self, Self::Error> {
        CalendarMonth::new(value.year, value.month)
    }
}

/// Query string of the public upcoming feed.
#[derive(Debug, Default, Deserialize)]
pub struct UpcomingParams {
    pub limit: Option<usize>,
}

#[derive(Deserialize, Validate)]
pub struct ScheduleContentForm {
    /// `recipe` or `article`.
    pub content_type: String,
    #[validate(range(min = 1))]
    pub content_id: i32,
    pub publication_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleContentFormPayload {
    pub content: ContentRef,
    pub publication_date: NaiveDateTime,
}

impl ScheduleContentFormPayload {
    pub fn into_new_publication(self) -> NewPublication {
        let now = Utc::now().naive_utc();
        NewPublication {
            content: self.content,
            publication_date: self.publication_date,
            status: PublicationStatus::Scheduled,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScheduleContentFormError {
    #[error("Schedule form validation failed: {0}")]
    Validation(String),
    #[error("Schedule form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ScheduleContentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ScheduleContentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ScheduleContentForm> for ScheduleContentFormPayload {
    type Error = ScheduleContentFormError;

    fn try_from(value: ScheduleContentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let content = match ContentKind::try_from(value.content_type.trim())? {
            ContentKind::Recipe => ContentRef::Recipe(RecipeId::new(value.content_id)?),
            ContentKind::Article => ContentRef::Article(ArticleId::new(value.content_id)?),
        };

        Ok(Self {
            content,
            publication_date: value.publication_date,
        })
    }
}

#[derive(Deserialize)]
pub struct RescheduleForm {
    pub publication_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RescheduleFormPayload {
    pub publication_id: PublicationId,
    pub publication_date: NaiveDateTime,
}

#[derive(Debug, Error)]
pub enum RescheduleFormError {
    #[error("Reschedule form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for RescheduleFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<(i32, RescheduleForm)> for RescheduleFormPayload {
    type Error = RescheduleFormError;

    fn try_from((publication_id, value): (i32, RescheduleForm)) -> Result<Self, Self::Error> {
        Ok(Self {
            publication_id: PublicationId::new(publication_id)?,
            publication_date: value.publication_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn schedule_form_builds_recipe_reference() {
        let form = ScheduleContentForm {
            content_type: "recipe".into(),
            content_id: 4,
            publication_date: date(),
        };

        let payload: ScheduleContentFormPayload = form.try_into().unwrap();
        assert_eq!(payload.content, ContentRef::Recipe(RecipeId::new(4).unwrap()));

        let publication = payload.into_new_publication();
        assert_eq!(publication.status, PublicationStatus::Scheduled);
        assert_eq!(publication.publication_date, date());
    }

    #[test]
    fn schedule_form_rejects_unknown_type() {
        let form = ScheduleContentForm {
            content_type: "video".into(),
            content_id: 4,
            publication_date: date(),
        };

        let payload: Result<ScheduleContentFormPayload, _> = form.try_into();
        assert!(matches!(
            payload,
            Err(ScheduleContentFormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn calendar_params_validate_month() {
        let ok: Result<CalendarMonth, _> = CalendarParams {
            year: 2024,
            month: 2,
        }
        .try_into();
        assert_eq!(ok.unwrap().days_in_month(), 29);

        let bad: Result<CalendarMonth, _> = CalendarParams {
            year: 2024,
            month: 13,
        }
        .try_into();
        assert!(bad.is_err());
    }
}
