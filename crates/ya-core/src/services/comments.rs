use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::Mutation;
use crate::config::ModerationConfig;
use crate::domain::{Comment, Destination};
use crate::error::DomainError;
use crate::ownership::{Action, Actor, authorize};
use crate::ports::{CommentRepository, NewsRepository};
use crate::validation::CommentCandidate;

/// Submitted comment form.
#[derive(Debug, Clone, Default)]
pub struct CommentInput {
    pub text: String,
}

/// Comment mutations: anyone logged in may comment, only the author may
/// edit or delete.
pub struct CommentService {
    news: Arc<dyn NewsRepository>,
    comments: Arc<dyn CommentRepository>,
    moderation: ModerationConfig,
}

impl CommentService {
    pub fn new(
        news: Arc<dyn NewsRepository>,
        comments: Arc<dyn CommentRepository>,
        moderation: ModerationConfig,
    ) -> Self {
        Self {
            news,
            comments,
            moderation,
        }
    }

    /// Comment on a news item as `actor`.
    pub async fn create(
        &self,
        actor: &Actor,
        news_id: Uuid,
        input: CommentInput,
    ) -> Result<Mutation<Comment>, DomainError> {
        let author_id = actor.require_user()?;
        if self.news.find_by_id(news_id).await?.is_none() {
            return Err(DomainError::not_found("news", news_id));
        }

        let text = input.text.trim();
        self.check(text)?;

        let comment = self
            .comments
            .create(Comment::new(news_id, author_id, text.to_string()))
            .await?;

        tracing::info!(comment_id = %comment.id, news_id = %news_id, "Comment created");
        Ok(Mutation {
            value: comment,
            redirect: Destination::NewsComments(news_id),
        })
    }

    /// Load a comment the actor is about to edit or delete.
    pub async fn get(
        &self,
        actor: &Actor,
        id: Uuid,
        action: Action,
    ) -> Result<Comment, DomainError> {
        actor.require_user()?;
        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("comment", id))?;

        authorize(actor, &comment, action).into_result()?;
        Ok(comment)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        input: CommentInput,
    ) -> Result<Mutation<Comment>, DomainError> {
        let mut comment = self.get(actor, id, Action::Edit).await?;

        let text = input.text.trim();
        self.check(text)?;

        comment.text = text.to_string();
        comment.updated_at = Utc::now();
        let comment = self.comments.update(comment).await?;

        tracing::info!(comment_id = %comment.id, "Comment updated");
        Ok(Mutation {
            redirect: Destination::NewsComments(comment.news_id),
            value: comment,
        })
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<Mutation<Comment>, DomainError> {
        let comment = self.get(actor, id, Action::Delete).await?;
        self.comments.delete(comment.id).await?;

        tracing::info!(comment_id = %comment.id, "Comment deleted");
        Ok(Mutation {
            redirect: Destination::NewsComments(comment.news_id),
            value: comment,
        })
    }

    fn check(&self, text: &str) -> Result<(), DomainError> {
        CommentCandidate {
            text,
            forbidden_words: &self.moderation.forbidden_words,
        }
        .validate()
        .map_err(|errors| {
            tracing::debug!(%errors, "Comment rejected");
            DomainError::Validation(errors)
        })
    }
}
