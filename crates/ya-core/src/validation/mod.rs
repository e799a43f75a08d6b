//! Field validation pipeline.
//!
//! A validator is a plain function looking at one candidate and reporting
//! at most one problem with one field. Pipelines are ordered slices of
//! validators; every validator runs and all errors are collected.

mod comment;
mod note;
pub mod slug;
mod user;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub use comment::{CommentCandidate, FORBIDDEN_WORDS_WARNING};
pub use note::{NoteCandidate, SLUG_TAKEN_WARNING, slug_taken_message};
pub use user::{SignupCandidate, USERNAME_TAKEN};

pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// A single problem with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validator over a candidate of type `C`.
pub type Validator<C> = fn(&C) -> Option<FieldError>;

/// Errors grouped by field name, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors consisting of one message on one field.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(FieldError::new(field, message));
        errors
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.entry(error.field).or_default().push(error.message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// `(field, messages)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> + '_ {
        self.0.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        let mut errors = Self::new();
        for error in iter {
            errors.push(error);
        }
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Run `validators` in order against `candidate`.
pub fn validate<C>(candidate: &C, validators: &[Validator<C>]) -> Result<(), FieldErrors> {
    let errors: FieldErrors = validators
        .iter()
        .filter_map(|validator| validator(candidate))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `Some(error)` when `value` is blank.
pub(crate) fn required(field: &'static str, value: &str) -> Option<FieldError> {
    value
        .trim()
        .is_empty()
        .then(|| FieldError::new(field, REQUIRED_MESSAGE))
}

/// `Some(error)` when `value` is longer than `max` characters.
pub(crate) fn max_length(field: &'static str, value: &str, max: usize) -> Option<FieldError> {
    let length = value.chars().count();
    (length > max).then(|| {
        FieldError::new(
            field,
            format!("Ensure this value has at most {max} characters (it has {length})."),
        )
    })
}
