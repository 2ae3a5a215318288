use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User, UserChanges};
use crate::domain::validation::RawUserFields;
use serde::{Deserialize, Serialize};

/// Body of `POST /users`. Field types are checked during validation, not by
/// the JSON extractor, so a wrongly typed field still yields a per-field error.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CreateUserRequest(pub RawUserFields);

/// Body of `PUT /users/{id}`; every field is optional.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct UpdateUserRequest(pub RawUserFields);

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = DomainError;

    fn try_from(request: CreateUserRequest) -> Result<Self, Self::Error> {
        request.0.into_new_user().map_err(DomainError::Validation)
    }
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = DomainError;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        request.0.into_changes().map_err(DomainError::Validation)
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub message: &'static str,
    pub user: User,
}
