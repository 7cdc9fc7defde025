//! In-memory user store using a Tokio mutex for single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use credo_core::error::AppError;
use credo_core::result::AppResult;
use credo_core::types::UserId;
use credo_entity::user::{CreateUser, User, UserStatus};

use super::UserStore;

#[derive(Debug, Default)]
struct InnerState {
    /// Last assigned id.
    last_id: i64,
    /// Users keyed by id.
    users: HashMap<UserId, User>,
    /// Username to id index.
    by_username: HashMap<String, UserId>,
}

/// In-memory user store.
///
/// Suitable for single-node deployments and tests only. Nothing survives a
/// restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.state.lock().await.users.len()
    }

    /// Whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .by_username
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;

        if state.by_username.contains_key(&data.username) {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        let id = UserId::new(state.last_id + 1)
            .ok_or_else(|| AppError::internal("User id space exhausted"))?;
        state.last_id = id.get();

        let user = User {
            id,
            username: data.username.clone(),
            status: UserStatus::Active,
            password_hash: data.password_hash.clone(),
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        };
        state.by_username.insert(user.username.clone(), id);
        state.users.insert(id, user.clone());

        debug!(user_id = %id, "User created in memory store");
        Ok(user)
    }

    async fn update_password_hash(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}
