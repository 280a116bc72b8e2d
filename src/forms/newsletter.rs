use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{SubscriberEmail, TypeConstraintError};

/// Body of the subscribe and unsubscribe requests.
#[derive(Deserialize, Validate)]
pub struct NewsletterForm {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsletterFormPayload {
    pub email: SubscriberEmail,
}

#[derive(Debug, Error)]
pub enum NewsletterFormError {
    #[error("Newsletter form validation failed: {0}")]
    Validation(String),
    #[error("Newsletter form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for NewsletterFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for NewsletterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<NewsletterForm> for NewsletterFormPayload {
    type Error = NewsletterFormError;

    fn try_from(value: NewsletterForm) -> Result<Self, Self::Error> {
        let value = NewsletterForm {
            email: value.email.trim().to_string(),
        };
        value.validate()?;
        Ok(Self {
            email: SubscriberEmail::new(value.email)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newsletter_form_normalizes_email() {
        let form = NewsletterForm {
            email: " Cook@Example.COM ".into(),
        };

        let payload: NewsletterFormPayload = form.try_into().unwrap();
        assert_eq!(payload.email.as_str(), "cook@example.com");
    }

    #[test]
    fn newsletter_form_rejects_invalid_email() {
        let form = NewsletterForm {
            email: "not-an-email".into(),
        };

        let payload: Result<NewsletterFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(NewsletterFormError::Validation(_))));
    }
}
