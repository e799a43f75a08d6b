//! Standardized API response types (RFC 7807 compliant for errors).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Messages per field name.
pub type FieldErrorMap = BTreeMap<String, Vec<String>>;

/// A form echoed back to the client: the submitted values and, after a
/// rejected submission, the errors per field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormView<T> {
    pub values: T,
    pub errors: FieldErrorMap,
}

impl<T> FormView<T> {
    /// A form with no errors.
    pub fn blank(values: T) -> Self {
        Self {
            values,
            errors: FieldErrorMap::new(),
        }
    }

    pub fn with_errors(values: T, errors: FieldErrorMap) -> Self {
        Self { values, errors }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Field errors of a rejected submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrorMap>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            errors: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_errors(mut self, errors: FieldErrorMap) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    /// Missing and foreign resources share this body.
    pub fn not_found() -> Self {
        Self::new(404, "Not Found")
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_detail(detail)
    }

    pub fn unprocessable(errors: FieldErrorMap) -> Self {
        Self::new(422, "Unprocessable Entity").with_errors(errors)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}
