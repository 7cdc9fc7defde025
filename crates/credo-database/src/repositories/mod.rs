//! User store abstraction and its implementations.

pub mod memory;
pub mod user;

use async_trait::async_trait;

use credo_core::result::AppResult;
use credo_core::types::UserId;
use credo_entity::user::{CreateUser, User};

pub use memory::MemoryUserStore;
pub use user::UserRepository;

/// Persistence operations the authentication flows depend on.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create a new active user. Fails with `Conflict` when the username is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace a user's stored password hash.
    async fn update_password_hash(&self, id: UserId, password_hash: &str) -> AppResult<()>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<()>;
}
