//! Content services.
//!
//! Each mutation walks the same path: ownership guard, field validation,
//! commit, destination. Denials and validation failures return before
//! the store is touched.

mod comments;
mod news;
mod notes;
mod users;

pub use comments::{CommentInput, CommentService};
pub use news::{NewsDetail, NewsService, Page};
pub use notes::{NoteInput, NoteService};
pub use users::{Credentials, INVALID_LOGIN, NON_FIELD_ERRORS, Session, UserService};

use crate::domain::Destination;

/// A committed mutation and where to send the client next.
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    pub value: T,
    pub redirect: Destination,
}
