use url::Url;
use crate::error::{Result, TailorError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a URL string
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            TailorError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(TailorError::Validation(format!(
                "{} URL must use http or https, got: {}",
                field_name, url
            )));
        }

        Ok(())
    }

    /// Validate the remote base URI
    pub fn validate_remote_base_uri(url: &str) -> Result<()> {
        Self::validate_url(url, "remote base")
    }

    /// Validate an API version segment such as `v1`
    pub fn validate_api_version(version: &str) -> Result<()> {
        let mut chars = version.chars();
        let valid = chars.next() == Some('v')
            && !version[1..].is_empty()
            && chars.all(|c| c.is_ascii_digit());

        if !valid {
            return Err(TailorError::Validation(format!(
                "API version must look like 'v1', got: {}",
                version
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(ConfigValidator::validate_url("https://extensions.typo3.org/", "TER").is_ok());
        assert!(ConfigValidator::validate_url("http://localhost:8080", "TER").is_ok());
        assert!(ConfigValidator::validate_url("not-a-url", "TER").is_err());
        assert!(ConfigValidator::validate_url("ftp://extensions.typo3.org/", "TER").is_err());
    }

    #[test]
    fn test_validate_api_version() {
        assert!(ConfigValidator::validate_api_version("v1").is_ok());
        assert!(ConfigValidator::validate_api_version("v12").is_ok());
        assert!(ConfigValidator::validate_api_version("v").is_err());
        assert!(ConfigValidator::validate_api_version("1").is_err());
        assert!(ConfigValidator::validate_api_version("vx").is_err());
        assert!(ConfigValidator::validate_api_version("").is_err());
    }
}
