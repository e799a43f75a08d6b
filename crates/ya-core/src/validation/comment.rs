//! Comment field validators.

use super::{FieldError, FieldErrors, Validator, required, validate};

/// Shown when comment text contains a forbidden word.
pub const FORBIDDEN_WORDS_WARNING: &str = "Don't swear!";

/// Comment text together with the words it must not contain.
#[derive(Debug, Clone)]
pub struct CommentCandidate<'a> {
    pub text: &'a str,
    pub forbidden_words: &'a [String],
}

impl CommentCandidate<'_> {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let validators: [Validator<Self>; 2] = [
            text_required as Validator<Self>,
            text_is_clean as Validator<Self>,
        ];
        validate(self, &validators)
    }
}

fn text_required(comment: &CommentCandidate<'_>) -> Option<FieldError> {
    required("text", comment.text)
}

/// Plain, case-sensitive substring search; words hidden inside longer words
/// count too.
fn text_is_clean(comment: &CommentCandidate<'_>) -> Option<FieldError> {
    comment
        .forbidden_words
        .iter()
        .filter(|word| !word.is_empty())
        .any(|word| comment.text.contains(word.as_str()))
        .then(|| FieldError::new("text", FORBIDDEN_WORDS_WARNING))
}
