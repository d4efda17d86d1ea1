use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::models::{AuthResponse, User};

use super::fallback::{self, is_offline_token, local_part, DemoAccount, DEMO_ACCOUNTS};
use super::{Credentials, FallbackMode};

const SIGNUP_ENDPOINT: &str = "/auth/signup";
const LOGIN_ENDPOINT: &str = "/auth/login";

/// Owns the login/signup/logout lifecycle and is the only writer of the
/// shared `Credentials`.
pub struct SessionManager {
    api: ApiClient,
    credentials: Arc<Credentials>,
    fallback: FallbackMode,
}

impl SessionManager {
    pub fn new(api: ApiClient, credentials: Arc<Credentials>) -> Self {
        Self {
            api,
            credentials,
            fallback: FallbackMode::Disabled,
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackMode) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> FallbackMode {
        self.fallback
    }

    /// Create an account and start a session for it.
    /// Email and name are trimmed; all three fields must be non-empty.
    pub async fn signup(&self, email: &str, password: &str, full_name: &str) -> Result<AuthResponse> {
        let email = required("email", email)?;
        let password = required_secret(password)?;
        let full_name = required("full name", full_name)?;

        match self.request_signup(email, password, full_name).await {
            Err(err) if err.is_backend_failure() && self.fallback == FallbackMode::Offline => {
                warn!(email, error = %err, "Signup failed, starting offline session");
                self.start_offline(email, Some(full_name)).await
            }
            result => result,
        }
    }

    /// Sign in to an existing account.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let email = required("email", email)?;
        let password = required_secret(password)?;

        let err = match self.request_login(email, password).await {
            Err(err) if err.is_backend_failure() => err,
            result => return result,
        };

        match self.fallback {
            FallbackMode::Disabled => Err(err),
            FallbackMode::AutoSignup => {
                // No usable name means there is no signup to attempt
                let Ok(full_name) = required("full name", local_part(email)) else {
                    return Err(err);
                };
                warn!(email, error = %err, "Login failed, creating account instead");
                self.request_signup(email, password, full_name).await
            }
            FallbackMode::Offline => {
                warn!(email, error = %err, "Login failed, starting offline session");
                self.start_offline(email, None).await
            }
        }
    }

    /// Sign in with one of the built-in demo accounts
    pub async fn login_demo(&self, account: &DemoAccount) -> Result<AuthResponse> {
        self.login(account.email, account.password).await
    }

    pub fn demo_accounts(&self) -> &'static [DemoAccount] {
        &DEMO_ACCOUNTS
    }

    /// Remove the token and the cached user. Safe to call when signed out.
    pub async fn logout(&self) -> Result<()> {
        self.credentials.clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Cached user record. Missing, unreadable or corrupt records are `None`.
    pub fn current_user(&self) -> Option<User> {
        let raw = match self.credentials.user_json() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "Failed to read cached user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(error = %err, "Failed to parse cached user");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// True when the current session was fabricated by the offline fallback
    pub fn is_offline(&self) -> bool {
        self.token().is_some_and(|token| is_offline_token(&token))
    }

    pub fn token(&self) -> Option<String> {
        self.credentials.token().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to read auth token");
            None
        })
    }

    async fn request_signup(&self, email: &str, password: &str, full_name: &str) -> Result<AuthResponse> {
        let body = json!({
            "email": email,
            "password": password,
            "fullName": full_name,
        });
        let auth: AuthResponse = self.api.post(SIGNUP_ENDPOINT, &body).await?;
        self.start(auth).await
    }

    async fn request_login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = json!({
            "email": email,
            "password": password,
        });
        let auth: AuthResponse = self.api.post(LOGIN_ENDPOINT, &body).await?;
        self.start(auth).await
    }

    async fn start(&self, auth: AuthResponse) -> Result<AuthResponse> {
        if auth.token.trim().is_empty() {
            return Err(Error::MalformedResponse(
                "Auth response carried an empty token".to_string(),
            ));
        }
        self.credentials.persist(&auth.token, &auth.user).await?;
        info!(email = %auth.user.email, "Session started");
        Ok(auth)
    }

    async fn start_offline(&self, email: &str, full_name: Option<&str>) -> Result<AuthResponse> {
        let auth = fallback::offline_session(email, full_name);
        self.credentials.persist(&auth.token, &auth.user).await?;
        info!(email, "Offline session started");
        Ok(auth)
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidInput(format!("{} is required", field)));
    }
    Ok(value)
}

/// Passwords are sent exactly as typed but may not be blank
fn required_secret(password: &str) -> Result<&str> {
    if password.trim().is_empty() {
        return Err(Error::InvalidInput("password is required".to_string()));
    }
    Ok(password)
}
