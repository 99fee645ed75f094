//! HTTP client abstraction for testability

use std::time::Duration;

use reqwest::StatusCode;

use super::types::SourceError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the response body.
    ///
    /// Status 404 maps to [`SourceError::NotFound`], 429 to
    /// [`SourceError::RateLimited`], everything else that is not a success
    /// (including timeouts) to [`SourceError::FetchFailed`].
    fn get(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, SourceError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    ///
    /// The timeout is the only deadline a run has: a request that exceeds it
    /// surfaces as a per-tile `FetchFailed`.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(format!("terrainmap/{}", crate::VERSION))
            .build()
            .map_err(|e| SourceError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

/// Maps a non-success status to the matching per-tile error.
pub(crate) fn status_error(status: StatusCode) -> SourceError {
    match status {
        StatusCode::NOT_FOUND => SourceError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => SourceError::RateLimited,
        other => SourceError::FetchFailed(format!("HTTP {}", other)),
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        // URLs may carry access tokens, keep them out of error messages.
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| SourceError::FetchFailed(format!("Request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| {
                SourceError::FetchFailed(format!("Failed to read response: {}", e.without_url()))
            })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Mock HTTP client for testing
    pub struct MockHttpClient {
        pub response: Result<Vec<u8>, SourceError>,
        pub requested: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn new(response: Result<Vec<u8>, SourceError>) -> Self {
            Self {
                response,
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn last_url(&self) -> Option<String> {
            self.requested.lock().last().cloned()
        }
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, url: &str) -> Result<Vec<u8>, SourceError> {
            self.requested.lock().push(url.to_string());
            self.response.clone()
        }
    }

    #[test]
    fn test_mock_client_success() {
        let mock = MockHttpClient::new(Ok(vec![1, 2, 3, 4]));

        let result = mock.get("http://example.com");
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(mock.last_url().as_deref(), Some("http://example.com"));
    }

    #[test]
    fn test_mock_client_error() {
        let mock = MockHttpClient::new(Err(SourceError::RateLimited));
        assert_eq!(mock.get("http://example.com"), Err(SourceError::RateLimited));
    }

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(status_error(StatusCode::NOT_FOUND), SourceError::NotFound);
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS),
            SourceError::RateLimited
        );
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY),
            SourceError::FetchFailed("HTTP 502 Bad Gateway".to_string())
        );
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::with_timeout(5).is_ok());
    }
}
