use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ownership::Owned;

/// Comment left by a user under a news item.
///
/// `news_id`, `author_id` and `created_at` are fixed at creation; only
/// `text` changes on edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub news_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(news_id: Uuid, author_id: Uuid, text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            news_id,
            author_id,
            text,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}
