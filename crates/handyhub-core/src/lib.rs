//! Client core for the HandyHub handyman-booking marketplace.
//!
//! This crate provides:
//! - `store`: durable key-value storage for the auth token and cached user
//! - `api`: the request executor that talks to the marketplace backend
//! - `auth`: the session manager (login, signup, logout, offline fallback)
//! - `services`: resource clients for bookings, providers and user profiles
//!
//! `HandyHub` wires all of them together from a `ClientConfig`.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod hub;
pub mod models;
pub mod services;
pub mod store;

pub use api::{ApiClient, HttpExecutor, Method, RequestExecutor};
pub use auth::{Credentials, FallbackMode, SessionManager};
pub use config::{ClientConfig, Config};
pub use error::{Error, Result};
pub use hub::HandyHub;
pub use services::{BookingClient, ProviderClient, UserClient};
pub use store::{FileStore, KeyValueStore, KeyringStore, MemoryStore, StoreBackend};
