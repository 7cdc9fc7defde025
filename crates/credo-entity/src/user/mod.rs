//! User domain entities.

pub mod model;
pub mod status;

pub use model::{CreateUser, User};
pub use status::UserStatus;
