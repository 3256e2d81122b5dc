//! Runtime configuration read from the environment.

use crate::BrainscanError;

/// Endpoint of the hosted tumor classifier.
pub const DEFAULT_PREDICT_URL: &str = "https://tumor-backend.onrender.com/predict/";

/// Environment variable overriding the prediction endpoint.
pub const PREDICT_URL_ENV: &str = "BRAINSCAN_PREDICT_URL";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL the multipart prediction request is posted to
    pub predict_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predict_url: DEFAULT_PREDICT_URL.to_string(),
        }
    }
}

impl Config {
    /// Build configuration from environment variables, falling back to defaults.
    ///
    /// # Errors
    /// Returns `BrainscanError::Config` if the endpoint override is not an http(s) URL.
    pub fn from_env() -> crate::Result<Self> {
        let predict_url = std::env::var(PREDICT_URL_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PREDICT_URL.to_string());

        Self::with_predict_url(predict_url)
    }

    /// Build configuration for an explicit endpoint.
    ///
    /// # Errors
    /// Returns `BrainscanError::Config` if the endpoint is not an http(s) URL.
    pub fn with_predict_url(predict_url: impl Into<String>) -> crate::Result<Self> {
        let predict_url = predict_url.into();
        let parsed = reqwest::Url::parse(&predict_url)
            .map_err(|e| BrainscanError::Config(format!("{PREDICT_URL_ENV}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BrainscanError::Config(format!(
                "{PREDICT_URL_ENV}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self { predict_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_hosted_classifier() {
        assert_eq!(Config::default().predict_url, DEFAULT_PREDICT_URL);
    }

    #[test]
    fn test_explicit_url_accepted() {
        let config = Config::with_predict_url("http://127.0.0.1:8080/predict/").expect("valid");
        assert_eq!(config.predict_url, "http://127.0.0.1:8080/predict/");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(Config::with_predict_url("ftp://example.org/predict").is_err());
        assert!(Config::with_predict_url("not a url").is_err());
    }
}
