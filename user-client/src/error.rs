use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum UserClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("User not found")]
    NotFound,
    #[error("Email already exists")]
    EmailTaken,
    #[error("Invalid request: {}", format_violations(.0))]
    Validation(Vec<FieldViolation>),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Validation { errors: Vec<FieldViolation> },
    Message { message: String },
}

impl UserClientError {
    pub async fn from_http_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        match resp.bytes().await {
            Ok(body) => Self::from_parts(status, &body),
            Err(err) => Self::RequestError(err),
        }
    }

    /// Maps a non-success status and its body onto the server's error
    /// classification.
    pub fn from_parts(status: StatusCode, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<ErrorBody>(body).ok();

        match (status, parsed) {
            (StatusCode::NOT_FOUND, _) => Self::NotFound,
            (StatusCode::BAD_REQUEST, Some(ErrorBody::Validation { errors })) => {
                Self::Validation(errors)
            }
            (StatusCode::BAD_REQUEST, Some(ErrorBody::Message { message }))
                if message == "Email already exists" =>
            {
                Self::EmailTaken
            }
            (status, Some(ErrorBody::Message { message })) => Self::Server {
                status: status.as_u16(),
                message,
            },
            (status, _) => Self::Server {
                status: status.as_u16(),
                message: String::from_utf8_lossy(body).trim().to_owned(),
            },
        }
    }
}
