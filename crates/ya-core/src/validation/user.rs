//! Account field validators.

use std::sync::LazyLock;

use regex::Regex;

use super::{FieldError, FieldErrors, Validator, max_length, required, validate};

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("static username pattern"));

/// A signup form plus what the store knows about the username.
#[derive(Debug, Clone)]
pub struct SignupCandidate<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub username_taken: bool,
}

impl SignupCandidate<'_> {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let validators: [Validator<Self>; 6] = [
            username_required as Validator<Self>,
            username_length as Validator<Self>,
            username_format as Validator<Self>,
            username_unique as Validator<Self>,
            password_required as Validator<Self>,
            password_length as Validator<Self>,
        ];
        validate(self, &validators)
    }
}

fn username_required(user: &SignupCandidate<'_>) -> Option<FieldError> {
    required("username", user.username)
}

fn username_length(user: &SignupCandidate<'_>) -> Option<FieldError> {
    max_length("username", user.username, USERNAME_MAX_LENGTH)
}

fn username_format(user: &SignupCandidate<'_>) -> Option<FieldError> {
    if user.username.is_empty() || USERNAME_PATTERN.is_match(user.username) {
        return None;
    }
    Some(FieldError::new(
        "username",
        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
    ))
}

fn username_unique(user: &SignupCandidate<'_>) -> Option<FieldError> {
    user.username_taken
        .then(|| FieldError::new("username", USERNAME_TAKEN))
}

fn password_required(user: &SignupCandidate<'_>) -> Option<FieldError> {
    required("password", user.password)
}

fn password_length(user: &SignupCandidate<'_>) -> Option<FieldError> {
    let length = user.password.chars().count();
    (length > 0 && length < PASSWORD_MIN_LENGTH).then(|| {
        FieldError::new(
            "password",
            format!(
                "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
            ),
        )
    })
}
