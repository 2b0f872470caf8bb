use thiserror::Error;

/// Failure to obtain a remote document
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, timeout)
    #[error("Failed to fetch {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status
    #[error("Fetching {url} failed with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The response arrived but its body could not be read
    #[error("Failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// Failure to run an external process to completion
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' was terminated without an exit code")]
    Terminated { program: String },
}
