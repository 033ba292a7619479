//! Wire format of `POST /api/shorten`.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::domain::entities::{QrImage, ShortenRequest, ShortenResult};

/// JSON body sent to the API.
///
/// Absent optional fields are left out of the JSON entirely so the server's own
/// defaulting applies; a blank custom code counts as absent.
///
/// ```json
/// { "url": "https://example.com/a", "want_qr": true, "expires_at": "2026-01-08T10:00:00Z" }
/// ```
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ShortenBody<'a> {
    pub url: &'a str,
    pub custom_code: Option<&'a str>,
    pub want_qr: bool,
    /// RFC 3339 in UTC.
    pub expires_at: Option<String>,
}

impl<'a> From<&'a ShortenRequest> for ShortenBody<'a> {
    fn from(req: &'a ShortenRequest) -> Self {
        Self {
            url: &req.url,
            custom_code: req.custom_code.as_deref().filter(|c| !c.trim().is_empty()),
            want_qr: req.want_qr,
            expires_at: req
                .expires_at
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

/// JSON body returned by the API on success.
#[derive(Debug, Deserialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    /// Data URL of a PNG QR code; omitted when not requested.
    #[serde(default)]
    pub qr_base64: Option<String>,
}

impl From<ShortenResponse> for ShortenResult {
    fn from(resp: ShortenResponse) -> Self {
        Self {
            code: resp.code,
            short_url: resp.short_url,
            qr_image: resp.qr_base64.and_then(QrImage::from_data_url),
        }
    }
}
