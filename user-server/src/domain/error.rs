use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::validation::FieldError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("User not found")]
    UserNotFound,
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("{0}")]
    Storage(String),
}

/// Failures reported by a `UserRepository`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("duplicate value for unique field `{0}`")]
    DuplicateKey(&'static str),
    #[error("{0}")]
    Other(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateKey(_) => DomainError::EmailAlreadyExists,
            StorageError::Other(message) => DomainError::Storage(message),
        }
    }
}

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    errors: &'a [FieldError],
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) | DomainError::EmailAlreadyExists => StatusCode::BAD_REQUEST,
            DomainError::UserNotFound => StatusCode::NOT_FOUND,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            DomainError::Validation(errors) => response.json(ValidationBody { errors }),
            DomainError::Storage(message) => {
                error!(error = %message, "storage failure surfaced to client");
                response.json(MessageBody { message })
            }
            _ => {
                let message = self.to_string();
                response.json(MessageBody {
                    message: message.as_str(),
                })
            }
        }
    }
}
