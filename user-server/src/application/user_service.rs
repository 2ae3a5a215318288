use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::error::{DomainError, StorageError};
use crate::domain::user::{NewUser, User, UserChanges};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

/// Identifiers that are not well-formed can never match a stored record.
fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::UserNotFound)
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_user(&self, id: &str) -> Result<User, DomainError> {
        let id = parse_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, user: NewUser) -> Result<User, DomainError> {
        Ok(self.repo.insert(user).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: &str, changes: UserChanges) -> Result<User, DomainError> {
        let id = parse_id(id)?;
        self.repo
            .update_by_id(id, changes)
            .await
            .map_err(|err| match err {
                // Only inserts classify a unique violation as a client error.
                duplicate @ StorageError::DuplicateKey(_) => {
                    DomainError::Storage(duplicate.to_string())
                }
                other => other.into(),
            })?
            .ok_or(DomainError::UserNotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<User, DomainError> {
        let id = parse_id(id)?;
        self.repo
            .delete_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }
}
