//! Wire format of `GET /api/urls/{code}/stats`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::LinkStats;

/// Analytics object returned by the API.
///
/// The server does not echo the code back; [`StatsResponse::into_stats`] attaches
/// the code that was requested. `countries` is omitted by the server when there
/// is no geographic data.
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub original: String,
    pub clicks: u64,
    pub unique_visitors: u64,
    pub expires_at: Option<DateTime<Utc>>,
    pub countries: Option<HashMap<String, u64>>,
}

impl StatsResponse {
    pub fn into_stats(self, code: &str) -> LinkStats {
        LinkStats {
            code: code.to_string(),
            original_url: self.original,
            clicks: self.clicks,
            unique_visitors: self.unique_visitors,
            expires_at: self.expires_at,
            countries: self.countries.unwrap_or_default(),
        }
    }
}
