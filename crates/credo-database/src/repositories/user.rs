//! PostgreSQL user repository.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use credo_core::error::{AppError, ErrorKind};
use credo_core::result::AppResult;
use credo_core::types::UserId;
use credo_entity::user::{CreateUser, User};

use super::UserStore;

const FIND_BY_ID: &str = "SELECT id, username, status, password_hash, created_at, updated_at, deleted_at \
     FROM users WHERE id = $1 LIMIT 1";

const FIND_BY_USERNAME: &str = "SELECT id, username, status, password_hash, created_at, updated_at, deleted_at \
     FROM users WHERE username = $1 LIMIT 1";

const INSERT_USER: &str = "INSERT INTO users (username, password_hash) VALUES ($1, $2) \
     RETURNING id, username, status, password_hash, created_at, updated_at, deleted_at";

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(1);

/// Repository for user persistence backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(FIND_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(FIND_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(INSERT_USER)
            .bind(&data.username)
            .bind(&data.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::conflict(format!("Username '{}' already exists", data.username))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
            })
    }

    async fn update_password_hash(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update password hash", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        let ping = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&self.pool);
        match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, ping).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(AppError::with_source(
                ErrorKind::Database,
                "Health check failed",
                e,
            )),
            Err(_) => Err(AppError::service_unavailable("Health check timed out")),
        }
    }
}
