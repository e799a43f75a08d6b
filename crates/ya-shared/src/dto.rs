//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- users --

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

// -- news --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsResponse {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

/// One page of the news feed, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPageResponse {
    pub items: Vec<NewsResponse>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub news_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A news item with its comments, oldest first.
///
/// `form` is only present for logged-in readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDetailResponse {
    pub news: NewsResponse,
    pub comments: Vec<CommentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<CommentForm>,
}

/// Comment form, used for both create and edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

// -- notes --

/// Note form. A blank `slug` is derived from `title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResponse {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Confirmation page shown before a delete is submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfirmation<T> {
    pub object: T,
}

/// Plain informational page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMessage {
    pub message: String,
}

impl PageMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
