//! # YaBoard Infrastructure
//!
//! Concrete implementations of the ports defined in `ya-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;
pub mod memory;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::DatabaseConfig;
pub use memory::{
    InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
    InMemoryUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnections, PostgresCommentRepository, PostgresNewsRepository,
    PostgresNoteRepository, PostgresUserRepository,
};
