//! SeaORM entities and their conversions to domain types.

pub mod comment;
pub mod news;
pub mod note;
pub mod user;
