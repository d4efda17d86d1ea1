//! reqwest-backed request executor.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, error};

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::{Error, Result};

use super::error::truncate_body;
use super::{Method, RequestExecutor};

/// Executor for the marketplace REST API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpExecutor {
    client: Client,
    base_url: String,
    credentials: Arc<Credentials>,
}

impl HttpExecutor {
    pub fn new(config: &ClientConfig, credentials: Arc<Credentials>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = self.credentials.token()? {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::Storage("Stored token is not a valid header value".to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn send(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        let mut request = self
            .client
            .request(method.into(), self.url(endpoint))
            .headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(method = %method, endpoint, status = status.as_u16(), "Response received");

        // The body is parsed before the status is looked at, so an error page
        // that is not JSON surfaces as a malformed response.
        let data: Value = serde_json::from_str(&text).map_err(|e| {
            Error::MalformedResponse(format!(
                "Status {}: {} ({})",
                status,
                e,
                truncate_body(&text)
            ))
        })?;

        if !status.is_success() {
            return Err(Error::from_status(status, &data));
        }
        Ok(data)
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        self.send(method, endpoint, body).await.map_err(|err| {
            error!(method = %method, endpoint, error = %err, "API request failed");
            err
        })
    }
}
