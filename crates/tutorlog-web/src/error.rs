//! HTTP-facing error type.
//!
//! Blank-field validation never lands here — handlers turn it into a flash
//! redirect. What remains is the terminal taxonomy: unknown ids become 404
//! pages, everything else a logged 500.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use tracing::error;

use crate::render::error_page;

#[derive(Debug)]
pub enum ApiError {
    Database(tutorlog_core::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<tutorlog_core::Error> for ApiError {
    fn from(err: tutorlog_core::Error) -> Self {
        match &err {
            tutorlog_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            tutorlog_core::Error::LearnerNotFound(id) => {
                ApiError::NotFound(format!("Learner {} not found", id))
            }
            tutorlog_core::Error::NoteNotFound(id) => {
                ApiError::NotFound(format!("Note {} not found", id))
            }
            tutorlog_core::Error::Validation(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Database(err) => {
                error!(
                    subsystem = "web",
                    op = "request",
                    error = %err,
                    "Request failed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Html(error_page(status.as_u16(), &message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_learner_not_found_maps_to_404() {
        let id = Uuid::new_v4();
        let err: ApiError = tutorlog_core::Error::LearnerNotFound(id).into();
        match err {
            ApiError::NotFound(msg) => assert!(msg.contains(&id.to_string())),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_note_not_found_maps_to_404() {
        let err: ApiError = tutorlog_core::Error::NoteNotFound(Uuid::nil()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err: ApiError =
            tutorlog_core::Error::Validation("name must not be blank".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_io_maps_to_500() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err: ApiError = tutorlog_core::Error::Io(io).into();
        assert!(matches!(err, ApiError::Database(_)));
    }
}
