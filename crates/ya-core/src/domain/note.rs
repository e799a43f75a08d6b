use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ownership::Owned;

/// Private note. Visible to and editable by its author only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    /// Store-wide unique address of the note.
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(author_id: Uuid, title: String, text: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            text,
            slug,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Note {
    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}
