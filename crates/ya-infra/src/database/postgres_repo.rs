//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use ya_core::domain::{Comment, News, Note, User};
use ya_core::error::RepoError;
use ya_core::ports::{CommentRepository, NewsRepository, NoteRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::news::{self, Entity as NewsEntity};
use super::entity::note::{self, Entity as NoteEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL news repository.
pub type PostgresNewsRepository = PostgresBaseRepository<NewsEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL note repository.
pub type PostgresNoteRepository = PostgresBaseRepository<NoteEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl NewsRepository for PostgresNewsRepository {
    async fn latest(&self, offset: u64, limit: u64) -> Result<Vec<News>, RepoError> {
        let result = NewsEntity::find()
            .order_by_desc(news::Column::Date)
            .order_by_asc(news::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_news_id(&self, news_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::NewsId.eq(news_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, RepoError> {
        let result = NoteEntity::find()
            .filter(note::Column::Slug.eq(slug))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Note>, RepoError> {
        let result = NoteEntity::find()
            .filter(note::Column::AuthorId.eq(author_id))
            .order_by_asc(note::Column::CreatedAt)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
