use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Sends one request and returns the parsed JSON body.
///
/// `endpoint` is a path relative to the configured base URL, including any
/// query string (e.g. `/bookings?page=1&limit=20`). Implementations must not
/// retry; each call is a single request.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value>;
}

/// Shared handle over a `RequestExecutor` with typed helpers.
/// Clone is cheap - the executor sits behind an `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    executor: Arc<dyn RequestExecutor>,
}

impl ApiClient {
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Raw call, returning the JSON body untouched
    pub async fn execute(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        self.executor.execute(method, endpoint, body).await
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let value = self.execute(Method::Get, endpoint, None).await?;
        decode(endpoint, value)
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode(body)?;
        let value = self.execute(Method::Post, endpoint, Some(&body)).await?;
        decode(endpoint, value)
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode(body)?;
        let value = self.execute(Method::Put, endpoint, Some(&body)).await?;
        decode(endpoint, value)
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let value = self.execute(Method::Delete, endpoint, None).await?;
        decode(endpoint, value)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize request body: {}", e)))
}

/// Convert a JSON body into the expected type; shape mismatches are malformed responses
pub(crate) fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        Error::MalformedResponse(format!("Unexpected response from {}: {}", endpoint, e))
    })
}
