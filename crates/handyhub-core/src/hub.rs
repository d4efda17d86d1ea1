use std::sync::Arc;

use crate::api::{ApiClient, HttpExecutor, RequestExecutor};
use crate::auth::{Credentials, FallbackMode, SessionManager};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::services::{BookingClient, ProviderClient, UserClient};
use crate::store::KeyValueStore;

/// One session context with every client that uses it.
pub struct HandyHub {
    credentials: Arc<Credentials>,
    session: SessionManager,
    bookings: BookingClient,
    providers: ProviderClient,
    users: UserClient,
}

impl HandyHub {
    /// Connect to the configured backend over HTTP
    pub fn new(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let credentials = Arc::new(Credentials::new(store));
        let executor = HttpExecutor::new(config, credentials.clone())?;
        Ok(Self::with_executor(
            Arc::new(executor),
            credentials,
            config.fallback,
        ))
    }

    /// Wire the clients over any executor. `credentials` must be the same
    /// context the executor reads its token from.
    pub fn with_executor(
        executor: Arc<dyn RequestExecutor>,
        credentials: Arc<Credentials>,
        fallback: FallbackMode,
    ) -> Self {
        let api = ApiClient::new(executor);
        Self {
            session: SessionManager::new(api.clone(), credentials.clone()).with_fallback(fallback),
            bookings: BookingClient::new(api.clone()),
            providers: ProviderClient::new(api.clone()),
            users: UserClient::new(api),
            credentials,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn bookings(&self) -> &BookingClient {
        &self.bookings
    }

    pub fn providers(&self) -> &ProviderClient {
        &self.providers
    }

    pub fn users(&self) -> &UserClient {
        &self.users
    }

    pub fn credentials(&self) -> &Arc<Credentials> {
        &self.credentials
    }
}
