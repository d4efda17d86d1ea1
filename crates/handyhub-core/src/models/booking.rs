use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use url::form_urlencoded;

/// Default page for booking listings
pub const DEFAULT_BOOKING_PAGE: u32 = 1;

/// Default page size for booking listings
pub const DEFAULT_BOOKING_LIMIT: u32 = 20;

/// Body of `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewBooking {
    pub provider_id: String,
    pub service: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Kept as a JSON number so `500` goes out as `500`, not `500.0`
    #[cfg_attr(feature = "ts", ts(type = "number"))]
    pub amount: Number,
}

/// A booking as the server returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts", ts(type = "number | null"))]
    pub amount: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(skip))]
    pub extra: Map<String, Value>,
}

/// Filters for `GET /bookings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingQuery {
    pub status: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for BookingQuery {
    fn default() -> Self {
        Self {
            status: None,
            page: DEFAULT_BOOKING_PAGE,
            limit: DEFAULT_BOOKING_LIMIT,
        }
    }
}

impl BookingQuery {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Encoded query string, without the leading `?`
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            query.append_pair("status", status);
        }
        query.append_pair("page", &self.page.to_string());
        query.append_pair("limit", &self.limit.to_string());
        query.finish()
    }
}
