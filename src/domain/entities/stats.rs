//! Per-link analytics snapshot.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Analytics for a single short code.
///
/// Always replaced wholesale by the next successful fetch; never merged with a
/// previous snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub code: String,
    pub original_url: String,
    pub clicks: u64,
    pub unique_visitors: u64,
    pub expires_at: Option<DateTime<Utc>>,
    /// Click count per country identifier (ISO-2 as reported by the server).
    pub countries: HashMap<String, u64>,
}

impl LinkStats {
    /// Countries ordered for display: most clicks first, ties by identifier.
    pub fn countries_by_clicks(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self
            .countries
            .iter()
            .map(|(country, count)| (country.as_str(), *count))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    pub fn has_geo_data(&self) -> bool {
        !self.countries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(countries: &[(&str, u64)]) -> LinkStats {
        LinkStats {
            code: "crina2025".to_string(),
            original_url: "https://example.com".to_string(),
            clicks: countries.iter().map(|(_, c)| c).sum(),
            unique_visitors: 1,
            expires_at: None,
            countries: countries
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    #[test]
    fn test_countries_by_clicks_orders_descending() {
        let stats = stats_with(&[("RO", 2), ("US", 9), ("DE", 2), ("FR", 5)]);

        let rows = stats.countries_by_clicks();

        assert_eq!(rows, vec![("US", 9), ("FR", 5), ("DE", 2), ("RO", 2)]);
    }

    #[test]
    fn test_has_geo_data() {
        assert!(!stats_with(&[]).has_geo_data());
        assert!(stats_with(&[("US", 1)]).has_geo_data());
    }
}
