// ABOUTME: HTTP client for the APOD API
// ABOUTME: Fetches the daily metadata record and downloads the referenced image

use log::{debug, info};
use reqwest::blocking::{Client as ReqwestClient, ClientBuilder, Response};
use std::fmt;
use std::time::Duration;

use crate::config::{mask_secret, Config};
use crate::error::{retrieval_error, AppError};
use crate::record::ApodRecord;

/// Upper bound on every request made by the client
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// API client for the Astronomy Picture of the Day service
pub struct ApodClient {
    /// The underlying reqwest client for making HTTP requests
    http_client: ReqwestClient,

    /// Metadata endpoint
    base_url: String,

    api_key: String,
}

impl ApodClient {
    /// Create a new client with the given configuration
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http_client = ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("apod-wallpaper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Generic(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Client initialized with base URL: {}", config.base_url);

        Ok(ApodClient {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Get the metadata endpoint URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and decode today's record
    pub fn fetch_record(&self) -> Result<ApodRecord, AppError> {
        info!("Fetching APOD metadata from {}", self.base_url);

        let request = self
            .http_client
            .get(&self.base_url)
            .query(&[("api_key", self.api_key.as_str())]);
        // The request URL carries the API key, so errors are reported against the base URL
        let body = read_body(&self.base_url, request.send())?;
        debug!("Received {} bytes of metadata", body.len());

        let record = ApodRecord::from_json(&body)?;
        info!("Retrieved APOD '{}' for {}", record.title, record.date);
        Ok(record)
    }

    /// Download the raw image bytes for a record
    ///
    /// Uses `hdurl` when `hd` is set, otherwise `url`.
    pub fn download_image(&self, record: &ApodRecord, hd: bool) -> Result<Vec<u8>, AppError> {
        let url = record.image_url(hd);
        info!(
            "Downloading {} image from {}",
            if hd { "high-definition" } else { "standard" },
            url
        );

        let bytes = read_body(url, self.http_client.get(url).send())?;
        debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }
}

impl fmt::Debug for ApodClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApodClient")
            .field("base_url", &self.base_url)
            .field("api_key", &mask_secret(&self.api_key))
            .finish()
    }
}

/// Turn a request outcome into the response body, or a retrieval error naming `url`
fn read_body(url: &str, sent: reqwest::Result<Response>) -> Result<Vec<u8>, AppError> {
    let response = sent.map_err(|e| retrieval_error(url, describe(e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(retrieval_error(url, format!("HTTP status {}", status)));
    }

    let bytes = response
        .bytes()
        .map_err(|e| retrieval_error(url, describe(e)))?;
    Ok(bytes.to_vec())
}

fn describe(error: reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out after {}s", REQUEST_TIMEOUT.as_secs())
    } else {
        error.without_url().to_string()
    }
}
