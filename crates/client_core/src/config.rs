use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_LISTING_DESTINATION: &str = "/donors";

/// Where the registry API lives. Passed to the gateway at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: parsed.scheme().to_string(),
            });
        }
        Ok(Self { base_url: parsed })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/donors/7`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
