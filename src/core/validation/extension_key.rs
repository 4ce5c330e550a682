use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{Result, TailorError};

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*[a-z0-9]$").expect("valid extension key pattern"))
}

const RESERVED_PREFIXES: [&str; 6] = ["tx", "user_", "pages", "tt_", "sys_", "csh_"];

/// Check an extension key against the TER registration rules
pub fn validate_extension_key(key: &str) -> Result<()> {
    if !(3..=30).contains(&key.len()) {
        return Err(TailorError::Validation(format!(
            "Extension key '{}' must be between 3 and 30 characters long",
            key
        )));
    }

    if !key_pattern().is_match(key) || key.contains("__") {
        return Err(TailorError::Validation(format!(
            "Extension key '{}' may only contain lowercase letters, digits and single underscores, and must start with a letter",
            key
        )));
    }

    if let Some(prefix) = RESERVED_PREFIXES.iter().find(|p| key.starts_with(*p)) {
        return Err(TailorError::Validation(format!(
            "Extension key '{}' uses the reserved prefix '{}'",
            key, prefix
        )));
    }

    Ok(())
}

/// Read `extra.typo3/cms.extension-key` from a `composer.json`
pub fn extension_key_from_composer(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let manifest: Value = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!("Ignoring unparsable {}: {}", path.display(), e);
            return None;
        }
    };

    manifest
        .pointer("/extra/typo3~1cms/extension-key")
        .and_then(Value::as_str)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Resolve the extension key: explicit argument, then configuration, then `composer.json`
pub fn resolve_extension_key(
    argument: Option<&str>,
    configured: Option<&str>,
    working_dir: &Path,
) -> Result<String> {
    let key = argument
        .map(str::to_string)
        .or_else(|| configured.map(str::to_string))
        .or_else(|| extension_key_from_composer(&working_dir.join("composer.json")))
        .ok_or_else(|| {
            TailorError::Validation(
                "No extension key given. Pass it as argument, set TYPO3_EXTENSION_KEY or add extra.typo3/cms.extension-key to composer.json"
                    .to_string(),
            )
        })?;

    validate_extension_key(&key)?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_extension_key() {
        assert!(validate_extension_key("my_ext").is_ok());
        assert!(validate_extension_key("news").is_ok());
        assert!(validate_extension_key("ab").is_err());
        assert!(validate_extension_key("My_Ext").is_err());
        assert!(validate_extension_key("1ext").is_err());
        assert!(validate_extension_key("my_ext_").is_err());
        assert!(validate_extension_key("my__ext").is_err());
        assert!(validate_extension_key("tx_news").is_err());
        assert!(validate_extension_key("sys_things").is_err());
        assert!(validate_extension_key(&"a".repeat(31)).is_err());
    }

    #[test]
    fn test_argument_wins() {
        let dir = tempfile::tempdir().unwrap();
        let key = resolve_extension_key(Some("from_arg"), Some("from_env"), dir.path()).unwrap();
        assert_eq!(key, "from_arg");
    }

    #[test]
    fn test_configured_key_before_composer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("composer.json"),
            r#"{"extra": {"typo3/cms": {"extension-key": "from_composer"}}}"#,
        )
        .unwrap();

        let key = resolve_extension_key(None, Some("from_env"), dir.path()).unwrap();
        assert_eq!(key, "from_env");

        let key = resolve_extension_key(None, None, dir.path()).unwrap();
        assert_eq!(key, "from_composer");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("composer.json"), r#"{"name": "vendor/package"}"#).unwrap();
        assert!(resolve_extension_key(None, None, dir.path()).is_err());
    }

    #[test]
    fn test_resolved_key_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_extension_key(Some("Invalid-Key"), None, dir.path()).is_err());
    }
}
