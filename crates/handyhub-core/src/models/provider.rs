use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Default page for review listings
pub const DEFAULT_REVIEW_PAGE: u32 = 1;

/// Default page size for review listings
pub const DEFAULT_REVIEW_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ServiceProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(skip))]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(skip))]
    pub extra: Map<String, Value>,
}

/// Filters for `GET /service-providers`.
///
/// Unset, empty and zero values are left out of the query entirely;
/// the server applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderQuery {
    pub category: Option<String>,
    pub location: Option<String>,
    pub min_rating: Option<f64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ProviderQuery {
    /// Encoded query string, without the leading `?`. May be empty.
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = self.category.as_deref().filter(|s| !s.is_empty()) {
            query.append_pair("category", category);
        }
        if let Some(location) = self.location.as_deref().filter(|s| !s.is_empty()) {
            query.append_pair("location", location);
        }
        if let Some(rating) = self.min_rating.filter(|r| *r != 0.0 && !r.is_nan()) {
            query.append_pair("minRating", &rating.to_string());
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            query.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            query.append_pair("limit", &limit.to_string());
        }
        query.finish()
    }
}

/// Pagination for `GET /service-providers/{id}/reviews`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewQuery {
    pub page: u32,
    pub limit: u32,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_REVIEW_PAGE,
            limit: DEFAULT_REVIEW_LIMIT,
        }
    }
}

impl ReviewQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &self.limit.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_provider_query() {
        assert_eq!(ProviderQuery::default().to_query_string(), "");
    }

    #[test]
    fn test_provider_query_encodes_supplied_filters_in_order() {
        let query = ProviderQuery {
            category: Some("AC Repair".to_string()),
            location: Some("Dhaka".to_string()),
            min_rating: Some(4.5),
            page: Some(2),
            limit: Some(10),
        };
        assert_eq!(
            query.to_query_string(),
            "category=AC+Repair&location=Dhaka&minRating=4.5&page=2&limit=10"
        );
    }

    #[test]
    fn test_provider_query_skips_zero_and_empty_values() {
        let query = ProviderQuery {
            category: Some(String::new()),
            min_rating: Some(0.0),
            page: Some(0),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(query.to_query_string(), "limit=5");
    }

    #[test]
    fn test_whole_ratings_have_no_fraction() {
        let query = ProviderQuery {
            min_rating: Some(4.0),
            ..Default::default()
        };
        assert_eq!(query.to_query_string(), "minRating=4");
    }

    #[test]
    fn test_review_query_defaults() {
        assert_eq!(ReviewQuery::default().to_query_string(), "page=1&limit=10");
    }
}
