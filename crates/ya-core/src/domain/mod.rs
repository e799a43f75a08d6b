//! Domain entities - the core business objects.

mod comment;
mod destination;
mod news;
mod note;
mod user;

pub use comment::Comment;
pub use destination::Destination;
pub use news::News;
pub use note::Note;
pub use user::User;
