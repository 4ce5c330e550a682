//! Reading and rewriting `ext_emconf.php`.
//!
//! The file is PHP, but TER extensions only ever put a single array literal
//! into it:
//!
//! ```php
//! $EM_CONF[$_EXTKEY] = [
//!     'title' => 'My extension',
//!     'version' => '1.0.0',
//! ];
//! ```
//!
//! We recognise that shape textually instead of evaluating PHP.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{MetadataError, Result};

pub const EMCONF_FILE_NAME: &str = "ext_emconf.php";

fn assignment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$EM_CONF\s*\[\s*\$_EXTKEY\s*\]\s*=\s*(?:\[|array\s*\()")
            .expect("valid assignment pattern")
    })
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?:'version'|"version")\s*=>\s*(?:'(?P<single>[^']*)'|"(?P<double>[^"]*)")"#)
            .expect("valid version pattern")
    })
}

/// Metadata declared by an extension's `ext_emconf.php`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMetadata {
    pub version: String,
}

/// Handle on an `ext_emconf.php` file
#[derive(Debug, Clone)]
pub struct EmConf {
    path: PathBuf,
}

impl EmConf {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Locate `ext_emconf.php` inside an extension directory
    pub fn in_directory<P: AsRef<Path>>(directory: P) -> Self {
        Self::new(directory.as_ref().join(EMCONF_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> std::result::Result<ExtensionMetadata, MetadataError> {
        let content = self.content()?;
        let start = self.array_start(&content)?;
        let captures = version_pattern()
            .captures(&content[start..])
            .ok_or_else(|| self.version_missing())?;
        let version = captures
            .name("single")
            .or_else(|| captures.name("double"))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        if version.is_empty() {
            return Err(self.version_missing());
        }

        Ok(ExtensionMetadata { version })
    }

    /// Replace the declared version, leaving every other byte of the file untouched
    pub fn write_version(&self, version: &str) -> Result<()> {
        let content = self.content()?;
        let start = self.array_start(&content)?;
        let captures = version_pattern()
            .captures(&content[start..])
            .ok_or_else(|| self.version_missing())?;
        let value = captures
            .name("single")
            .or_else(|| captures.name("double"))
            .ok_or_else(|| self.version_missing())?;

        let mut updated = String::with_capacity(content.len() + version.len());
        updated.push_str(&content[..start + value.start()]);
        updated.push_str(version);
        updated.push_str(&content[start + value.end()..]);

        fs::write(&self.path, updated)?;
        debug!("Set version {} in {}", version, self.path.display());
        Ok(())
    }

    fn content(&self) -> std::result::Result<String, MetadataError> {
        fs::read_to_string(&self.path).map_err(|source| MetadataError::Unreadable {
            path: self.path.clone(),
            source,
        })
    }

    /// Offset just past the `$EM_CONF[$_EXTKEY] = [` assignment
    fn array_start(&self, content: &str) -> std::result::Result<usize, MetadataError> {
        assignment_pattern()
            .find(content)
            .map(|m| m.end())
            .ok_or_else(|| MetadataError::Malformed {
                path: self.path.clone(),
            })
    }

    fn version_missing(&self) -> MetadataError {
        MetadataError::VersionMissing {
            path: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TailorError;

    const VALID: &str = r#"<?php

$EM_CONF[$_EXTKEY] = [
    'title' => 'Test extension',
    'description' => 'Used in tests',
    'state' => 'stable',
    'version' => '1.0.0',
    'constraints' => [
        'depends' => [
            'typo3' => '12.4.0-12.4.99',
        ],
    ],
];
"#;

    fn write_fixture(dir: &tempfile::TempDir, content: &str) -> EmConf {
        let path = dir.path().join(EMCONF_FILE_NAME);
        fs::write(&path, content).unwrap();
        EmConf::new(path)
    }

    #[test]
    fn test_read_version() {
        let dir = tempfile::tempdir().unwrap();
        let emconf = write_fixture(&dir, VALID);
        assert_eq!(emconf.read().unwrap().version, "1.0.0");
    }

    #[test]
    fn test_read_long_array_syntax_and_double_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let emconf = write_fixture(
            &dir,
            "<?php\n$EM_CONF[$_EXTKEY] = array(\n    \"title\" => \"x\",\n    \"version\" => \"2.3.4\",\n);\n",
        );
        assert_eq!(emconf.read().unwrap().version, "2.3.4");
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let emconf = EmConf::in_directory(dir.path());
        assert!(matches!(emconf.read(), Err(MetadataError::Unreadable { .. })));
    }

    #[test]
    fn test_wrong_structure_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let emconf = write_fixture(&dir, "<?php\n$config = ['version' => '1.0.0'];\n");
        assert!(matches!(emconf.read(), Err(MetadataError::Malformed { .. })));
    }

    #[test]
    fn test_no_version_entry() {
        let dir = tempfile::tempdir().unwrap();
        let emconf = write_fixture(&dir, "<?php\n$EM_CONF[$_EXTKEY] = [\n    'title' => 'x',\n    'php_version' => '8.1',\n];\n");
        assert!(matches!(emconf.read(), Err(MetadataError::VersionMissing { .. })));

        let emconf = write_fixture(&dir, "<?php\n$EM_CONF[$_EXTKEY] = [\n    'version' => '',\n];\n");
        assert!(matches!(emconf.read(), Err(MetadataError::VersionMissing { .. })));
    }

    #[test]
    fn test_write_version_keeps_other_content() {
        let dir = tempfile::tempdir().unwrap();
        let emconf = write_fixture(&dir, VALID);

        emconf.write_version("1.1.0").unwrap();

        let content = fs::read_to_string(emconf.path()).unwrap();
        assert_eq!(content, VALID.replace("'version' => '1.0.0'", "'version' => '1.1.0'"));
        assert_eq!(emconf.read().unwrap().version, "1.1.0");
    }

    #[test]
    fn test_write_version_requires_version_entry() {
        let dir = tempfile::tempdir().unwrap();
        let emconf = write_fixture(&dir, "<?php\n$EM_CONF[$_EXTKEY] = [];\n");
        assert!(matches!(
            emconf.write_version("1.0.0"),
            Err(TailorError::Metadata(MetadataError::VersionMissing { .. }))
        ));
    }
}
