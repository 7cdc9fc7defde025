//! # credo-database
//!
//! User persistence for Credo: the [`UserStore`] trait, a PostgreSQL
//! implementation backed by sqlx, and an in-memory implementation for
//! single-node runs and tests.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{MemoryUserStore, UserRepository, UserStore};
