//! JSON HTTP handlers. Public handlers are mounted under `/api/v1`, admin
//! handlers under `/admin`.

use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

use crate::services::{ServiceError, ServiceResult};

pub mod categories;
pub mod comments;
pub mod content;
pub mod newsletter;
pub mod schedule;

/// Map a service error to its HTTP status with an `{"error": ...}` body.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(json!({ "error": "unauthorized" }))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({ "error": "not found" })),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        _ => HttpResponse::InternalServerError().json(json!({ "error": "internal error" })),
    }
}

/// `200 OK` with the JSON value, or the mapped error.
pub fn json_response<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => error_response(err),
    }
}

/// `204 No Content`, or the mapped error.
pub fn empty_response(result: ServiceResult<()>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn form_errors_become_bad_request() {
        let response = error_response(ServiceError::Form("Slug is taken".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Slug is taken");
    }

    #[test]
    fn maps_remaining_errors() {
        assert_eq!(
            error_response(ServiceError::Unauthorized).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_response(ServiceError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(ServiceError::TypeConstraint("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(ServiceError::Internal).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(empty_response(Ok(())).status(), StatusCode::NO_CONTENT);
    }
}
