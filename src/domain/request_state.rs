//! Per-controller request lifecycle.

use serde::Serialize;

/// State of the most recently applied request of one controller.
///
/// `Loading` means a request was issued and no completion has been applied since.
/// Terminal states carry the payload or the user-facing error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Succeeded(T),
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Payload of a successful request.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Error message of a failed request.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
