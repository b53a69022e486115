use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

use crate::application::ports::file_fetcher::{FetchError, FileFetcher};

const FETCH_TIMEOUT_SECS: u64 = 60;

/// Downloads stored documents over HTTP.
pub struct HttpFileFetcher {
    client: Client,
}

impl HttpFileFetcher {
    pub fn new() -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FileFetcher for HttpFileFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkError(e.without_url().to_string()))?;

        Ok(bytes.to_vec())
    }
}
