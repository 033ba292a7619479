//! Error taxonomy shared by the API client and the controllers.
//!
//! Every variant renders a human-readable message through `Display`; that message
//! is what controllers store in their state for the UI to show.

use std::borrow::Cow;

use validator::ValidationErrors;

/// Errors produced by the client core.
///
/// - [`ClientError::Validation`] - rejected locally, the request never left the process
/// - [`ClientError::Http`] - the API answered with a non-success status
/// - [`ClientError::Transport`] - the request could not be completed (DNS, connect, timeout)
/// - [`ClientError::Decode`] - the response body did not match the expected shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds an HTTP error from a status code and the raw response body.
    ///
    /// A body that is empty or whitespace-only is replaced by the synthesized
    /// `Request failed (<status>)` message; any other body is kept verbatim.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            format!("Request failed ({status})")
        } else {
            body
        };

        Self::Http { status, message }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// HTTP status of the failed response, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Collapses `validator` output into a single field/message pair.
///
/// Fields are visited in name order so the reported error is stable.
impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let Some((field, errs)) = fields.first() else {
            return Self::validation("form", "Invalid input");
        };

        let message = errs
            .first()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| Cow::Owned(format!("Invalid value for {field}")));

        Self::validation(field.to_string(), message.into_owned())
    }
}
