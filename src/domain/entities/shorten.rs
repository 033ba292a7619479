//! Link creation request and result.

use std::sync::LazyLock;

use base64::Engine as _;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use validator::Validate;

use crate::error::ClientError;

/// Compiled regex for custom code validation.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// A validated request to create a short link.
///
/// `expires_at` is an absolute instant; the local wall-clock text typed by the user
/// is normalized before this struct is built (see [`crate::utils::dates`]).
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ShortenRequest {
    /// The long URL to shorten (absolute http/https).
    #[validate(custom(function = "crate::utils::url_validator::validate_long_url"))]
    pub url: String,

    /// Optional custom short code, 6-16 ASCII letters or digits.
    #[validate(length(min = 6, max = 16, message = "Custom code must be 6-16 characters"))]
    #[validate(regex(
        path = "*CUSTOM_CODE_REGEX",
        message = "Custom code can only contain letters and digits"
    ))]
    pub custom_code: Option<String>,

    /// Ask the server to render a QR code for the short URL.
    pub want_qr: bool,

    /// Optional expiry instant.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            custom_code: None,
            want_qr: true,
            expires_at: None,
        }
    }
}

/// Result of a successful creation. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenResult {
    pub code: String,
    pub short_url: String,
    pub qr_image: Option<QrImage>,
}

/// Inline QR image as delivered by the server (`data:image/png;base64,...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QrImage {
    data_url: String,
}

impl QrImage {
    /// Wraps a data URL; returns `None` for an empty string.
    pub fn from_data_url(data_url: impl Into<String>) -> Option<Self> {
        let data_url = data_url.into();
        if data_url.trim().is_empty() {
            return None;
        }
        Some(Self { data_url })
    }

    /// MIME type from the data URL header, e.g. `image/png`.
    pub fn mime_type(&self) -> Option<&str> {
        let (header, _) = self.split()?;
        let mime = header.split(';').next().unwrap_or_default();
        (!mime.is_empty()).then_some(mime)
    }

    /// Decodes the base64 payload into raw image bytes.
    ///
    /// A value without a `data:` header is treated as bare base64.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] if the payload is not valid base64.
    pub fn image_bytes(&self) -> Result<Vec<u8>, ClientError> {
        let payload = match self.split() {
            Some((_, payload)) => payload,
            None => self.data_url.as_str(),
        };

        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| ClientError::decode(format!("invalid QR image data: {e}")))
    }

    fn split(&self) -> Option<(&str, &str)> {
        self.data_url.strip_prefix("data:")?.split_once(',')
    }
}
