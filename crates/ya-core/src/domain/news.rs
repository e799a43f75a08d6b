use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// News item. Read-only as far as the content services are concerned;
/// comments hang off it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// Publication date, the home page sort key (newest first).
    pub date: NaiveDate,
}

impl News {
    /// Create a news item dated today.
    pub fn new(title: String, text: String) -> Self {
        Self::dated(title, text, Utc::now().date_naive())
    }

    pub fn dated(title: String, text: String, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            text,
            date,
        }
    }
}
