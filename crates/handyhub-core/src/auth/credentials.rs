use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::User;
use crate::store::KeyValueStore;

/// Store key for the bearer token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Store key for the serialized user record
pub const USER_DATA_KEY: &str = "userData";

/// Session context shared by the executor (reader) and the session manager
/// (writer). Writes go through one async mutex so a login and a logout
/// racing each other cannot leave a token without its user record.
pub struct Credentials {
    store: Arc<dyn KeyValueStore>,
    writer: Mutex<()>,
}

impl Credentials {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    /// Stored bearer token. An empty value counts as no token.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(AUTH_TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    /// Raw cached user JSON
    pub fn user_json(&self) -> Result<Option<String>> {
        self.store.get(USER_DATA_KEY)
    }

    /// Write token then user. If the user write fails the token is removed
    /// again so the pair stays all-or-nothing.
    pub(crate) async fn persist(&self, token: &str, user: &User) -> Result<()> {
        let user_json = serde_json::to_string(user)
            .map_err(|e| Error::Storage(format!("Failed to serialize user record: {}", e)))?;

        let _guard = self.writer.lock().await;
        self.store.set(AUTH_TOKEN_KEY, token)?;
        if let Err(err) = self.store.set(USER_DATA_KEY, &user_json) {
            warn!(error = %err, "Failed to store user record, rolling back token");
            if let Err(rollback) = self.store.remove(AUTH_TOKEN_KEY) {
                warn!(error = %rollback, "Failed to roll back token");
            }
            return Err(err);
        }
        debug!(email = %user.email, "Session persisted");
        Ok(())
    }

    /// Remove token and user. The token goes first so a failure halfway
    /// still leaves the session unauthenticated.
    pub(crate) async fn clear(&self) -> Result<()> {
        let _guard = self.writer.lock().await;
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(USER_DATA_KEY)?;
        debug!("Session cleared");
        Ok(())
    }
}
