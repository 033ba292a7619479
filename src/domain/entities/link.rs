//! Link summary entity as shown in the listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the link listing.
///
/// Identity key is `code`, unique within a single listing snapshot. Counters are
/// the server's aggregates at the time the listing was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    pub code: String,
    pub original_url: String,
    pub short_url: String,
    pub clicks: u64,
    pub unique_visitors: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkSummary {
    /// Creates a summary without timestamps.
    pub fn new(
        code: impl Into<String>,
        original_url: impl Into<String>,
        short_url: impl Into<String>,
        clicks: u64,
        unique_visitors: u64,
    ) -> Self {
        Self {
            code: code.into(),
            original_url: original_url.into(),
            short_url: short_url.into(),
            clicks,
            unique_visitors,
            created_at: None,
            expires_at: None,
        }
    }

    /// Returns true if the link has an expiry at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}
