//! Remote document retrieval

use crate::error::FetchError;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use tracing::debug;

/// Fetches a whole document body from a URL
pub trait DocumentFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP GET via reqwest
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a fetcher; `timeout` of `None` waits indefinitely
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pushgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network {
                url: String::new(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[derive(Debug, Clone)]
enum MockResponse {
    Body(Vec<u8>),
    Status(u16),
    NetworkDown,
    BrokenBody,
}

/// Scripted fetcher; unknown URLs behave like an unreachable host
#[derive(Default)]
pub struct MockFetcher {
    responses: RwLock<HashMap<String, MockResponse>>,
    requests: RwLock<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.script(url, MockResponse::Body(body.as_bytes().to_vec()))
    }

    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.script(url, MockResponse::Status(status))
    }

    pub fn with_network_error(self, url: &str) -> Self {
        self.script(url, MockResponse::NetworkDown)
    }

    pub fn with_broken_body(self, url: &str) -> Self {
        self.script(url, MockResponse::BrokenBody)
    }

    fn script(self, url: &str, response: MockResponse) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.to_string(), response);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

impl DocumentFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.write().unwrap().push(url.to_string());

        let response = self.responses.read().unwrap().get(url).cloned();
        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Status(status)) => Err(FetchError::HttpStatus {
                url: url.to_string(),
                status,
            }),
            Some(MockResponse::BrokenBody) => Err(FetchError::Body {
                url: url.to_string(),
                message: "connection reset while reading body".to_string(),
            }),
            Some(MockResponse::NetworkDown) | None => Err(FetchError::Network {
                url: url.to_string(),
                message: "host unreachable".to_string(),
            }),
        }
    }
}
