use std::env;
use crate::error::{Result, TailorError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const REMOTE_BASE_URI: &'static str = "TYPO3_REMOTE_BASE_URI";
    pub const API_VERSION: &'static str = "TYPO3_API_VERSION";
    pub const API_TOKEN: &'static str = "TYPO3_API_TOKEN";
    pub const API_USERNAME: &'static str = "TYPO3_API_USERNAME";
    pub const API_PASSWORD: &'static str = "TYPO3_API_PASSWORD";
    pub const EXTENSION_KEY: &'static str = "TYPO3_EXTENSION_KEY";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string with validation.
    ///
    /// Unset and blank variables both yield `None`.
    pub fn parse_string(var_name: &str, validator: Option<fn(&str) -> Result<()>>) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                if let Some(validate_fn) = validator {
                    validate_fn(&trimmed)?;
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(TailorError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    /// Parse a secret; surrounding whitespace is kept because it may be significant
    pub fn parse_secret(var_name: &str) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(TailorError::Validation(format!(
                "Environment variable {} contains invalid UTF-8",
                var_name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_trims_and_skips_blank() {
        env::set_var("TAILOR_TEST_PARSE_STRING", "  value  ");
        assert_eq!(
            EnvParser::parse_string("TAILOR_TEST_PARSE_STRING", None).unwrap(),
            Some("value".to_string())
        );

        env::set_var("TAILOR_TEST_PARSE_STRING_BLANK", "   ");
        assert_eq!(EnvParser::parse_string("TAILOR_TEST_PARSE_STRING_BLANK", None).unwrap(), None);

        assert_eq!(EnvParser::parse_string("TAILOR_TEST_PARSE_STRING_UNSET", None).unwrap(), None);
    }

    #[test]
    fn test_parse_string_runs_validator() {
        fn reject(_: &str) -> Result<()> {
            Err(TailorError::Validation("rejected".to_string()))
        }

        env::set_var("TAILOR_TEST_PARSE_VALIDATED", "anything");
        assert!(EnvParser::parse_string("TAILOR_TEST_PARSE_VALIDATED", Some(reject)).is_err());
    }

    #[test]
    fn test_parse_secret_keeps_whitespace() {
        env::set_var("TAILOR_TEST_PARSE_SECRET", " p4ss ");
        assert_eq!(
            EnvParser::parse_secret("TAILOR_TEST_PARSE_SECRET").unwrap(),
            Some(" p4ss ".to_string())
        );
    }
}
