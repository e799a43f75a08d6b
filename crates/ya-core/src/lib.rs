//! # YaBoard Core
//!
//! The domain layer of YaBoard.
//! This crate holds the business rules shared by the news and notes
//! applications: who may touch a resource, what makes its fields valid,
//! and how a mutation is carried out. It has no infrastructure dependencies.

pub mod config;
pub mod domain;
pub mod error;
pub mod ownership;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use ownership::{Access, Action, Actor, authorize};
pub use validation::{FieldError, FieldErrors};
