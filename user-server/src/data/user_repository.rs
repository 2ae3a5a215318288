use crate::domain::error::StorageError;
use crate::domain::user::{NewUser, User, UserChanges};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, StorageError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError>;
    /// Fails with [`StorageError::DuplicateKey`] when the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, StorageError>;
    async fn update_by_id(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<User>, StorageError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError>;
}

const EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn classify(e: sqlx::Error) -> StorageError {
    let duplicate_email = e
        .as_database_error()
        .filter(|db| db.is_unique_violation())
        .and_then(|db| db.constraint())
        .map(|c| c == EMAIL_CONSTRAINT)
        == Some(true);

    if duplicate_email {
        StorageError::DuplicateKey("email")
    } else {
        StorageError::Other(e.to_string())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, StorageError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, age, created_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing users: {}", e);
            classify(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, age, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            classify(e)
        })
    }

    async fn insert(&self, user: NewUser) -> Result<User, StorageError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, age)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, age, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to insert user: {}", e);
            classify(e)
        })?;

        info!(user_id = %user.id, email = %user.email, "user inserted");
        Ok(user)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<User>, StorageError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                name = COALESCE($1, name),
                email = COALESCE($2, email),
                age = COALESCE($3, age)
            WHERE id = $4
            RETURNING id, name, email, age, created_at
            "#,
        )
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.age)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update user {}: {}", id, e);
            classify(e)
        })?;

        if user.is_some() {
            info!(user_id = %id, "user updated");
        }

        Ok(user)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, email, age, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to delete user {}: {}", id, e);
            classify(e)
        })?;

        if user.is_some() {
            info!(user_id = %id, "user deleted");
        }

        Ok(user)
    }
}
