use crate::data::user_repository::UserRepository;
use crate::domain::error::StorageError;
use crate::domain::user::{NewUser, User, UserChanges};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Process-local store, kept in insertion order. Enforces the same email
/// uniqueness rule as the `users_email_key` constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &[User], email: &str, except: Option<Uuid>) -> bool {
    users
        .iter()
        .any(|user| user.email == email && Some(user.id) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StorageError> {
        let mut users = self.users.write().await;
        if email_taken(&users, &user.email, None) {
            return Err(StorageError::DuplicateKey("email"));
        }

        let user = User::new(user);
        users.push(user.clone());

        info!(user_id = %user.id, email = %user.email, "user inserted");
        Ok(user)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<User>, StorageError> {
        let mut users = self.users.write().await;
        let Some(position) = users.iter().position(|user| user.id == id) else {
            return Ok(None);
        };
        if let Some(email) = changes.email.as_deref() {
            if email_taken(&users, email, Some(id)) {
                return Err(StorageError::DuplicateKey("email"));
            }
        }

        let user = &mut users[position];
        user.apply(changes);

        info!(user_id = %id, "user updated");
        Ok(Some(user.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let mut users = self.users.write().await;
        let Some(position) = users.iter().position(|user| user.id == id) else {
            return Ok(None);
        };

        let user = users.remove(position);
        info!(user_id = %id, "user deleted");
        Ok(Some(user))
    }
}
