//! # YaBoard Shared
//!
//! Wire types of the HTTP API: request forms, response bodies and
//! RFC 7807 problem details.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldErrorMap, FormView};
