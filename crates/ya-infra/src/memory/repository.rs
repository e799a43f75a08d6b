use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ya_core::domain::{Comment, News, Note, User};
use ya_core::error::RepoError;
use ya_core::ports::{
    BaseRepository, CommentRepository, NewsRepository, NoteRepository, UserRepository,
};

/// A row the in-memory store knows how to key and constrain.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    /// `(column, value)` pairs that must be unique across the table.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

impl Record for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("username", self.username.clone())]
    }
}

impl Record for News {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Comment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Note {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("slug", self.slug.clone())]
    }
}

/// Generic in-memory repository.
pub struct InMemoryRepository<T: Record> {
    rows: RwLock<HashMap<Uuid, T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Rows matching `predicate`, in no particular order.
    async fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let rows = self.rows.read().await;
        rows.values().filter(|row| predicate(row)).cloned().collect()
    }

    fn check_unique(rows: &HashMap<Uuid, T>, entity: &T) -> Result<(), RepoError> {
        let keys = entity.unique_keys();
        for other in rows.values().filter(|other| other.id() != entity.id()) {
            for (column, value) in other.unique_keys() {
                if keys.iter().any(|(c, v)| *c == column && *v == value) {
                    return Err(RepoError::Unique(format!(
                        "duplicate key value violates unique constraint on {column}"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn create(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&entity.id()) {
            return Err(RepoError::Unique("duplicate primary key".to_string()));
        }
        Self::check_unique(&rows, &entity)?;

        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }
        Self::check_unique(&rows, &entity)?;

        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.len() as u64)
    }
}

/// In-memory user repository.
pub type InMemoryUserRepository = InMemoryRepository<User>;

/// In-memory news repository.
pub type InMemoryNewsRepository = InMemoryRepository<News>;

/// In-memory comment repository.
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;

/// In-memory note repository.
pub type InMemoryNoteRepository = InMemoryRepository<Note>;

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .select(|user| user.username == username)
            .await
            .into_iter()
            .next())
    }
}

#[async_trait]
impl NewsRepository for InMemoryNewsRepository {
    async fn latest(&self, offset: u64, limit: u64) -> Result<Vec<News>, RepoError> {
        let mut news = self.select(|_| true).await;
        news.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));

        Ok(news
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_news_id(&self, news_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let mut comments = self.select(|comment| comment.news_id == news_id).await;
        comments.sort_by_key(|comment| comment.created_at);
        Ok(comments)
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, RepoError> {
        Ok(self.select(|note| note.slug == slug).await.into_iter().next())
    }

    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Note>, RepoError> {
        let mut notes = self.select(|note| note.author_id == author_id).await;
        notes.sort_by_key(|note| note.created_at);
        Ok(notes)
    }
}
