use serde::de::DeserializeOwned;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{ProfileUpdate, ProviderApplication};

const PROFILE_ENDPOINT: &str = "/users/profile";
const BECOME_PROVIDER_ENDPOINT: &str = "/users/become-provider";

#[derive(Clone)]
pub struct UserClient {
    api: ApiClient,
}

impl UserClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn profile<T: DeserializeOwned>(&self) -> Result<T> {
        self.api.get(PROFILE_ENDPOINT).await
    }

    pub async fn update_profile<T: DeserializeOwned>(&self, update: &ProfileUpdate) -> Result<T> {
        self.api.put(PROFILE_ENDPOINT, update).await
    }

    /// Ask for the provider role on the signed-in account
    pub async fn become_provider<T: DeserializeOwned>(&self, application: &ProviderApplication) -> Result<T> {
        self.api.post(BECOME_PROVIDER_ENDPOINT, application).await
    }
}
