use std::env;
use std::time::Duration;

use url::Url;

use crate::error::BackendError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

/// Where the exam backend lives and how to talk to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: Url,
    request_timeout: Option<Duration>,
}

impl BackendConfig {
    /// Parse `raw` as the API root. A trailing slash is added when missing so
    /// endpoint paths resolve below it rather than replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidUrl` if `raw` is not an absolute URL.
    pub fn new(raw: &str) -> Result<Self, BackendError> {
        let trimmed = raw.trim();
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        Ok(Self {
            base_url: Url::parse(&normalized)?,
            request_timeout: None,
        })
    }

    /// Reads `READING_API_URL` and `READING_HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidUrl` if `READING_API_URL` is malformed.
    pub fn from_env() -> Result<Self, BackendError> {
        let raw = env::var("READING_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let timeout = env::var("READING_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Ok(Self::new(&raw)?.with_request_timeout(timeout))
    }

    /// `None` leaves requests without a timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Resolve an endpoint path relative to the API root.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidUrl` if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base_url.join(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_below_api_root() {
        let config = BackendConfig::new("http://exam.local:8000/api").unwrap();
        assert_eq!(
            config.endpoint("submit-reading/").unwrap().as_str(),
            "http://exam.local:8000/api/submit-reading/"
        );
    }

    #[test]
    fn default_points_at_local_backend() {
        let config = BackendConfig::new(DEFAULT_API_URL).unwrap();
        assert_eq!(
            config.endpoint("reading-test/").unwrap().as_str(),
            "http://localhost:8000/api/reading-test/"
        );
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn rejects_relative_url() {
        assert!(matches!(
            BackendConfig::new("api/"),
            Err(BackendError::InvalidUrl(_))
        ));
    }
}
