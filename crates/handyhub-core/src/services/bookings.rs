use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{BookingQuery, NewBooking};

const BOOKINGS_ENDPOINT: &str = "/bookings";

#[derive(Clone)]
pub struct BookingClient {
    api: ApiClient,
}

impl BookingClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create<T: DeserializeOwned>(&self, booking: &NewBooking) -> Result<T> {
        self.api.post(BOOKINGS_ENDPOINT, booking).await
    }

    /// Bookings of the signed-in user, optionally filtered by status
    pub async fn list<T: DeserializeOwned>(&self, query: &BookingQuery) -> Result<T> {
        let endpoint = format!("{}?{}", BOOKINGS_ENDPOINT, query.to_query_string());
        self.api.get(&endpoint).await
    }

    pub async fn get<T: DeserializeOwned>(&self, booking_id: &str) -> Result<T> {
        self.api.get(&booking_path(booking_id)).await
    }

    pub async fn update_status<T: DeserializeOwned>(&self, booking_id: &str, status: &str) -> Result<T> {
        self.api
            .put(&booking_path(booking_id), &json!({ "status": status }))
            .await
    }

    pub async fn cancel<T: DeserializeOwned>(&self, booking_id: &str) -> Result<T> {
        self.api.delete(&booking_path(booking_id)).await
    }
}

fn booking_path(booking_id: &str) -> String {
    format!("{}/{}", BOOKINGS_ENDPOINT, booking_id)
}
