//! Client configuration and base-URL resolution.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default backend base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "PEGAWAI_API_BASE_URL";

/// Fixed timeout applied to every outbound request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Resolves the base URL with precedence: env > explicit value > default.
    ///
    /// # Errors
    /// Returns an error if an env or explicit override is not a valid URL.
    pub fn resolve(base_url: Option<&str>) -> Result<Self> {
        if let Ok(env_url) = std::env::var(BASE_URL_ENV) {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(Self {
                    base_url: trimmed.to_string(),
                    timeout: REQUEST_TIMEOUT,
                });
            }
        }

        if let Some(url) = base_url {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(Self {
                    base_url: trimmed.to_string(),
                    timeout: REQUEST_TIMEOUT,
                });
            }
        }

        Ok(Self::default())
    }
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url)
        .map_err(|err| Error::Validation(format!("URL backend tidak valid: {url} ({err})")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_value_is_used() {
        let config = ApiConfig::resolve(Some("http://10.0.0.2:5000/api")).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:5000/api");
        assert_eq!(config.timeout, REQUEST_TIMEOUT);
    }

    #[test]
    fn missing_value_falls_back_to_default() {
        let config = ApiConfig::resolve(None).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn malformed_override_is_rejected() {
        let result = ApiConfig::resolve(Some("not a url"));
        assert!(result.is_err());
    }
}
