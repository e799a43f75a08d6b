//! Note field validators.

use super::slug::{SLUG_MAX_LENGTH, is_valid_slug};
use super::{FieldError, FieldErrors, Validator, max_length, required, validate};

pub const TITLE_MAX_LENGTH: usize = 100;

/// Appended to a slug that another note already uses.
pub const SLUG_TAKEN_WARNING: &str = " - such slug already exists, choose a unique one!";

const INVALID_SLUG: &str =
    "Enter a valid slug consisting of letters, numbers, underscores or hyphens.";

pub fn slug_taken_message(slug: &str) -> String {
    format!("{slug}{SLUG_TAKEN_WARNING}")
}

/// A note as it would be written, plus what the store knows about its slug.
#[derive(Debug, Clone)]
pub struct NoteCandidate<'a> {
    pub title: &'a str,
    pub text: &'a str,
    /// Explicit or derived slug.
    pub slug: &'a str,
    /// Another note already holds `slug`.
    pub slug_taken: bool,
}

impl NoteCandidate<'_> {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let validators: [Validator<Self>; 6] = [
            title_required as Validator<Self>,
            title_length as Validator<Self>,
            text_required as Validator<Self>,
            slug_length as Validator<Self>,
            slug_format as Validator<Self>,
            slug_unique as Validator<Self>,
        ];
        validate(self, &validators)
    }
}

fn title_required(note: &NoteCandidate<'_>) -> Option<FieldError> {
    required("title", note.title)
}

fn title_length(note: &NoteCandidate<'_>) -> Option<FieldError> {
    max_length("title", note.title, TITLE_MAX_LENGTH)
}

fn text_required(note: &NoteCandidate<'_>) -> Option<FieldError> {
    required("text", note.text)
}

fn slug_length(note: &NoteCandidate<'_>) -> Option<FieldError> {
    max_length("slug", note.slug, SLUG_MAX_LENGTH)
}

fn slug_format(note: &NoteCandidate<'_>) -> Option<FieldError> {
    // An empty slug only happens when it had to be derived; without a title
    // the title error already says what is wrong.
    if note.slug.is_empty() && note.title.trim().is_empty() {
        return None;
    }
    (!is_valid_slug(note.slug)).then(|| FieldError::new("slug", INVALID_SLUG))
}

fn slug_unique(note: &NoteCandidate<'_>) -> Option<FieldError> {
    note.slug_taken
        .then(|| FieldError::new("slug", slug_taken_message(note.slug)))
}
