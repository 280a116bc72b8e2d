//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions from domain and form errors live here.

use pushkind_common::repository::errors::RepositoryError;
use pushkind_common::services::errors::ServiceError;

use crate::domain::comment::ModerationError;
use crate::domain::types::TypeConstraintError;
use crate::forms::categories::{AddCategoryFormError, UpdateCategoryFormError};
use crate::forms::comments::{PostCommentFormError, RejectCommentFormError};
use crate::forms::content::{AddArticleFormError, AddRecipeFormError};
use crate::forms::newsletter::NewsletterFormError;
use crate::forms::schedule::{RescheduleFormError, ScheduleContentFormError};

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<ModerationError> for ServiceError {
    fn from(val: ModerationError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

macro_rules! form_error_into_service_error {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for ServiceError {
                fn from(val: $error) -> Self {
                    ServiceError::Form(val.to_string())
                }
            }
        )+
    };
}

form_error_into_service_error!(
    AddCategoryFormError,
    UpdateCategoryFormError,
    AddArticleFormError,
    AddRecipeFormError,
    ScheduleContentFormError,
    RescheduleFormError,
    PostCommentFormError,
    RejectCommentFormError,
    NewsletterFormError,
);
