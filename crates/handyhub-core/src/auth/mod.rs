//! Authentication module for managing user sessions and credentials.
//!
//! This module provides:
//! - `Credentials`: the shared session context over a `KeyValueStore`,
//!   holding the auth token and the cached user record
//! - `SessionManager`: login, signup and logout, and the only writer of
//!   `Credentials`
//! - `FallbackMode`: what login/signup do when the backend cannot be used
//!
//! Token and user record are always written and cleared together.

pub mod credentials;
pub mod fallback;
pub mod session;

pub use credentials::{Credentials, AUTH_TOKEN_KEY, USER_DATA_KEY};
pub use fallback::{DemoAccount, FallbackMode, DEMO_ACCOUNTS};
pub use session::SessionManager;
