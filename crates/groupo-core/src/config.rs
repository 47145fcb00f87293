//! Configuration module
//!
//! Client configuration is read from `GROUPO_`-prefixed environment variables
//! (optionally seeded from a `.env` file).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS, MAX_MEDIA_PER_POST, MAX_VIDEO_SECONDS,
};

const ENV_PREFIX: &str = "GROUPO_";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_max_media_per_post() -> usize {
    MAX_MEDIA_PER_POST
}

fn default_max_video_seconds() -> u64 {
    MAX_VIDEO_SECONDS
}

/// Upload client configuration
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Groupo API (GROUPO_API_URL)
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token attached to every request (GROUPO_TOKEN)
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// JSON index used to resolve addressable-library URIs (GROUPO_MEDIA_LIBRARY_INDEX)
    #[serde(default)]
    pub media_library_index: Option<PathBuf>,
    #[serde(default = "default_max_media_per_post")]
    pub max_media_per_post: usize,
    #[serde(default = "default_max_video_seconds")]
    pub max_video_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            request_timeout_secs: default_request_timeout_secs(),
            media_library_index: None,
            max_media_per_post: default_max_media_per_post(),
            max_video_seconds: default_max_video_seconds(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config: ClientConfig = envy::prefixed(ENV_PREFIX)
            .from_env()
            .context("Failed to read GROUPO_* environment variables")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from explicit key/value pairs (keys carry the `GROUPO_` prefix).
    pub fn from_pairs<I>(pairs: I) -> Result<Self, anyhow::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: ClientConfig = envy::prefixed(ENV_PREFIX)
            .from_iter(pairs)
            .context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(anyhow::anyhow!("GROUPO_API_URL must not be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "GROUPO_API_URL must start with http:// or https:// (got {})",
                url
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "GROUPO_REQUEST_TIMEOUT_SECS must be greater than 0"
            ));
        }
        if self.max_media_per_post == 0 {
            return Err(anyhow::anyhow!(
                "GROUPO_MAX_MEDIA_PER_POST must be greater than 0"
            ));
        }
        if self.max_video_seconds == 0 {
            return Err(anyhow::anyhow!(
                "GROUPO_MAX_VIDEO_SECONDS must be greater than 0"
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Bearer token, or an error telling the user to log in.
    pub fn require_token(&self) -> Result<&str, anyhow::Error> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("Missing token. Log in and set GROUPO_TOKEN"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_pairs(Vec::new()).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.max_media_per_post, 20);
        assert_eq!(config.max_video_seconds, 20);
        assert!(config.token.is_none());
        assert!(config.media_library_index.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_pairs(pairs(&[
            ("GROUPO_API_URL", "https://groupo.example.com"),
            ("GROUPO_TOKEN", "abc"),
            ("GROUPO_REQUEST_TIMEOUT_SECS", "15"),
            ("GROUPO_MEDIA_LIBRARY_INDEX", "/tmp/library.json"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://groupo.example.com");
        assert_eq!(config.require_token().unwrap(), "abc");
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(
            config.media_library_index,
            Some(PathBuf::from("/tmp/library.json"))
        );
    }

    #[test]
    fn test_rejects_bad_url_and_zero_limits() {
        assert!(ClientConfig::from_pairs(pairs(&[("GROUPO_API_URL", "ftp://x")])).is_err());
        assert!(ClientConfig::from_pairs(pairs(&[("GROUPO_REQUEST_TIMEOUT_SECS", "0")])).is_err());
        assert!(ClientConfig::from_pairs(pairs(&[("GROUPO_MAX_MEDIA_PER_POST", "0")])).is_err());
    }

    #[test]
    fn test_missing_token() {
        let config = ClientConfig::default();
        assert!(config.require_token().is_err());
    }
}
