//! Thin JSON-over-HTTP POST client.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, StrandError};

/// HTTP client bound to one scheme and host.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base: String,
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    scheme: String,
    host: String,
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Set the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder
            .build()
            .map_err(|source| StrandError::http("build client", source))?;
        Ok(HttpClient {
            inner,
            base: format!("{}://{}", self.scheme, self.host),
        })
    }
}

impl HttpClient {
    pub fn builder(scheme: &str, host: &str) -> HttpClientBuilder {
        HttpClientBuilder {
            scheme: scheme.to_string(),
            host: host.to_string(),
            timeout: None,
        }
    }

    /// Client with default options.
    pub fn new(scheme: &str, host: &str) -> Result<Self> {
        Self::builder(scheme, host).build()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// POST `req` as JSON to `path` and decode the JSON response body.
    pub async fn post<Req, Rsp>(&self, path: &str, req: &Req) -> Result<Rsp>
    where
        Req: Serialize + ?Sized,
        Rsp: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let response = self
            .inner
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|source| StrandError::http(format!("post {url}"), source))?;
        response
            .json()
            .await
            .map_err(|source| StrandError::http(format!("decode response from {url}"), source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_formatting() {
        let client = HttpClient::new("https", "example.com:8443").unwrap();
        assert_eq!(
            client.endpoint("/v1/query"),
            "https://example.com:8443/v1/query"
        );
    }

    #[test]
    fn test_builder_with_timeout() {
        let client = HttpClient::builder("http", "127.0.0.1:9000")
            .timeout(Duration::from_secs(3))
            .build();
        assert!(client.is_ok());
    }
}
