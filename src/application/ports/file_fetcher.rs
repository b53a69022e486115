use async_trait::async_trait;

#[derive(Debug)]
pub enum FetchError {
    NetworkError(String),
    HttpStatus(u16),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            FetchError::HttpStatus(code) => write!(f, "Unexpected HTTP status: {}", code),
        }
    }
}

impl std::error::Error for FetchError {}

/// Fetches the raw bytes of a stored document. Non-2xx responses fail; no
/// retries happen at this layer.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
