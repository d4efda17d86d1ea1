//! Session fallback when the backend is unreachable or rejects a sign-in.
//!
//! Fallback is opt-in. `Offline` sessions are marked on the returned
//! `AuthResponse` and their tokens carry `OFFLINE_TOKEN_PREFIX`, so callers
//! can always tell them apart from real accounts.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::models::{AuthResponse, User};

/// Prefix of locally fabricated tokens
pub const OFFLINE_TOKEN_PREFIX: &str = "offline-";

/// Length of the random part of an offline token
const OFFLINE_TOKEN_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackMode {
    /// Backend errors propagate to the caller
    #[default]
    Disabled,
    /// A failed login retries as a signup, named after the email's local part
    AutoSignup,
    /// A failed login or signup starts a locally fabricated session
    Offline,
}

impl FallbackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackMode::Disabled => "disabled",
            FallbackMode::AutoSignup => "auto-signup",
            FallbackMode::Offline => "offline",
        }
    }
}

impl fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" | "none" => Ok(FallbackMode::Disabled),
            "auto-signup" | "autosignup" | "demo" => Ok(FallbackMode::AutoSignup),
            "offline" => Ok(FallbackMode::Offline),
            other => Err(Error::InvalidInput(format!("Unknown fallback mode: {}", other))),
        }
    }
}

/// Quick-login account offered on the sign-in screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
}

pub const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        email: "pmahi@uiu.com",
        password: "password123",
        name: "Provat",
    },
    DemoAccount {
        email: "pk@handyman.com",
        password: "pk123",
        name: "PK",
    },
];

/// Part of an email address before the `@`
pub fn local_part(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

pub fn is_offline_token(token: &str) -> bool {
    token.starts_with(OFFLINE_TOKEN_PREFIX)
}

/// Fabricate a session for `email`. The name defaults to the email's local part.
pub(crate) fn offline_session(email: &str, full_name: Option<&str>) -> AuthResponse {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(OFFLINE_TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let local = local_part(email);
    let name = full_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(local);

    let mut extra = Map::new();
    extra.insert("offline".to_string(), Value::Bool(true));
    extra.insert("createdAt".to_string(), Value::String(Utc::now().to_rfc3339()));

    AuthResponse {
        token: format!("{}{}", OFFLINE_TOKEN_PREFIX, suffix),
        user: User {
            id: Some(format!("{}{}", OFFLINE_TOKEN_PREFIX, local)),
            email: email.to_string(),
            full_name: Some(name.to_string()),
            extra,
        },
        offline: true,
    }
}
