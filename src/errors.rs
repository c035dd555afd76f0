use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use log::error;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

use crate::dtos::ApiResponse;

/// Everything a request can fail with. Handlers return
/// `Result<HttpResponse, ApiError>` and propagate with `?`; the
/// `ResponseError` impl below is the single place errors become HTTP.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("The {0} field is required")]
    MissingField(&'static str),
    #[error("{0}")]
    InvalidPayload(String),
    #[error("Invalid id")]
    InvalidIdentifier,
    #[error("Invalid {0}")]
    InvalidReference(&'static str),
    #[error("An id is required for this operation")]
    MissingId,
    #[error("{0}")]
    DuplicateKey(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Route not found")]
    RouteNotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Database error")]
    Database(#[from] mongodb::error::Error),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a failed insert to `DuplicateKey` when the storage-side unique
    /// index rejected the write (the race the application pre-check cannot
    /// close), and to `Database` otherwise.
    pub fn from_insert(err: mongodb::error::Error, duplicate_message: &str) -> Self {
        if is_duplicate_key(&err) {
            ApiError::DuplicateKey(duplicate_message.to_string())
        } else {
            ApiError::Database(err)
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_)
            | ApiError::InvalidPayload(_)
            | ApiError::InvalidIdentifier
            | ApiError::InvalidReference(_)
            | ApiError::MissingId => StatusCode::BAD_REQUEST,
            ApiError::DuplicateKey(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Database(err) = self {
            error!("database error: {}", err);
        }
        HttpResponse::build(self.status_code()).json(ApiResponse::<()> {
            message: self.to_string(),
            data: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(ApiError::MissingField("username").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidPayload("bad json".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidIdentifier.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidReference("user_id").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingId.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_and_lookup_failures() {
        assert_eq!(ApiError::DuplicateKey("taken".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::NotFound("gone".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::Internal("boom".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_name_the_field() {
        assert_eq!(ApiError::MissingField("email").to_string(), "The email field is required");
        assert_eq!(ApiError::InvalidReference("post_id").to_string(), "Invalid post_id");
    }
}
