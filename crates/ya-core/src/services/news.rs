use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::config::FeedConfig;
use crate::domain::{Comment, News};
use crate::error::DomainError;
use crate::ports::{CommentRepository, NewsRepository};

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
}

/// A news item with its comments in posting order.
#[derive(Debug, Clone, Serialize)]
pub struct NewsDetail {
    pub news: News,
    pub comments: Vec<Comment>,
}

/// Public, read-only side of the news application.
pub struct NewsService {
    news: Arc<dyn NewsRepository>,
    comments: Arc<dyn CommentRepository>,
    feed: FeedConfig,
}

impl NewsService {
    pub fn new(
        news: Arc<dyn NewsRepository>,
        comments: Arc<dyn CommentRepository>,
        feed: FeedConfig,
    ) -> Self {
        Self {
            news,
            comments,
            feed,
        }
    }

    /// Home page: newest news first, `feed.page_size` per page.
    pub async fn home(&self, page: u64) -> Result<Page<News>, DomainError> {
        let page = page.max(1);
        let page_size = self.feed.page_size.max(1);
        let offset = (page - 1).saturating_mul(page_size);

        let items = self.news.latest(offset, page_size).await?;
        let total = self.news.count().await?;

        Ok(Page {
            items,
            page,
            page_size,
            total,
        })
    }

    pub async fn detail(&self, id: Uuid) -> Result<NewsDetail, DomainError> {
        let news = self
            .news
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("news", id))?;
        let comments = self.comments.find_by_news_id(id).await?;

        Ok(NewsDetail { news, comments })
    }
}
