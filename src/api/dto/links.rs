//! Wire format of `GET /api/urls`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::LinkSummary;

/// One element of the listing array.
///
/// Counters are unsigned: a negative value is a decode error, not a clamp.
#[derive(Debug, Deserialize)]
pub struct LinkItem {
    pub code: String,
    pub short_url: String,
    pub original: String,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: u64,
    pub unique_visitors: u64,
}

impl From<LinkItem> for LinkSummary {
    fn from(item: LinkItem) -> Self {
        Self {
            code: item.code,
            original_url: item.original,
            short_url: item.short_url,
            clicks: item.clicks,
            unique_visitors: item.unique_visitors,
            created_at: item.created_at,
            expires_at: item.expires_at,
        }
    }
}
