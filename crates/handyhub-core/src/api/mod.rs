//! Request executor for the HandyHub marketplace API.
//!
//! `RequestExecutor` is the seam every other component talks through.
//! `HttpExecutor` is the reqwest-backed implementation; it reads the bearer
//! token from the shared `Credentials` before every call. `ApiClient` is a
//! cheap, cloneable handle adding typed `get`/`post`/`put`/`delete` helpers.

pub mod client;
pub mod error;
pub mod http;

pub use client::{ApiClient, Method, RequestExecutor};
pub use http::HttpExecutor;
