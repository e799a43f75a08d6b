//! In-memory repositories - used when no database is configured and in tests.
//!
//! Each repository keeps its rows in a `HashMap` behind an async `RwLock`.
//! Unique columns are checked under the write lock, so the store behaves
//! like a database unique index: the second of two racing writers gets
//! `RepoError::Unique`.
//! Note: Data is lost on process restart.

mod repository;

pub use repository::{
    InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
    InMemoryRepository, InMemoryUserRepository, Record,
};

#[cfg(test)]
mod tests;
