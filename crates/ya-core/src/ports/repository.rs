use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, News, Note, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique constraint hits yield `RepoError::Unique`.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity, matched by ID.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;

    /// Number of stored entities.
    async fn count(&self) -> Result<u64, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their login name.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// News repository.
#[async_trait]
pub trait NewsRepository: BaseRepository<News, Uuid> {
    /// News ordered by date, newest first.
    async fn latest(&self, offset: u64, limit: u64) -> Result<Vec<News>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments of one news item, oldest first.
    async fn find_by_news_id(&self, news_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Note repository. The slug column is unique across all notes.
#[async_trait]
pub trait NoteRepository: BaseRepository<Note, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, RepoError>;

    /// Notes written by `author_id`, oldest first.
    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Note>, RepoError>;
}
