//! Long-URL validation for the shorten form.
//!
//! The server only accepts absolute `http`/`https` URLs, so the same rule is
//! enforced locally before a request is issued.

use std::borrow::Cow;

use url::Url;
use validator::ValidationError;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs can be shortened")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Parses a user-supplied long URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is ignored
/// 2. Must be absolute (relative references like `example.com/a` are rejected)
/// 3. Scheme must be `http` or `https`
/// 4. Must carry a non-empty host
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] rule that fails.
///
/// # Examples
///
/// ```ignore
/// assert!(parse_long_url("https://example.com/a").is_ok());
/// assert!(parse_long_url("javascript:alert(1)").is_err());
/// ```
pub fn parse_long_url(input: &str) -> Result<Url, UrlValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

/// `validator` adapter for [`parse_long_url`].
pub fn validate_long_url(input: &str) -> Result<(), ValidationError> {
    parse_long_url(input).map(|_| ()).map_err(|e| {
        ValidationError::new("long_url").with_message(Cow::Owned(e.to_string()))
    })
}
