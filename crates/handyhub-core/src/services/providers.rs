use serde::de::DeserializeOwned;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{ProviderQuery, ReviewQuery};

const PROVIDERS_ENDPOINT: &str = "/service-providers";

#[derive(Clone)]
pub struct ProviderClient {
    api: ApiClient,
}

impl ProviderClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Providers matching the supplied filters. The `?` is always sent,
    /// even when no filter is set.
    pub async fn list<T: DeserializeOwned>(&self, query: &ProviderQuery) -> Result<T> {
        let endpoint = format!("{}?{}", PROVIDERS_ENDPOINT, query.to_query_string());
        self.api.get(&endpoint).await
    }

    pub async fn get<T: DeserializeOwned>(&self, provider_id: &str) -> Result<T> {
        self.api
            .get(&format!("{}/{}", PROVIDERS_ENDPOINT, provider_id))
            .await
    }

    pub async fn reviews<T: DeserializeOwned>(&self, provider_id: &str, query: ReviewQuery) -> Result<T> {
        let endpoint = format!(
            "{}/{}/reviews?{}",
            PROVIDERS_ENDPOINT,
            provider_id,
            query.to_query_string()
        );
        self.api.get(&endpoint).await
    }
}
