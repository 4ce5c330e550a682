use regex::Regex;
use semver::Version;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use crate::core::metadata::EmConf;

fn publishable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("valid version pattern"))
}

/// TER only accepts plain `major.minor.patch` versions with up to three digits each
pub fn is_publishable_version(version: &str) -> bool {
    publishable_pattern().is_match(version)
}

/// Checks a version given on the command line against the one declared in `ext_emconf.php`.
///
/// Any problem reading the metadata file makes the version invalid. A
/// candidate is valid when it is a semantic version equal to the declared one.
pub struct VersionValidator {
    path: PathBuf,
}

impl VersionValidator {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn is_valid(&self, candidate: &str) -> bool {
        let declared = match EmConf::new(&self.path).read() {
            Ok(metadata) => metadata.version,
            Err(e) => {
                debug!("Version {} rejected: {}", candidate, e);
                return false;
            }
        };

        let (Ok(candidate), Ok(declared)) = (Version::parse(candidate.trim()), Version::parse(&declared)) else {
            debug!("Version {} or declared version {} is not a semantic version", candidate, declared);
            return false;
        };

        candidate == declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ext_emconf.php");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_invalid_if_no_file_found() {
        let dir = tempfile::tempdir().unwrap();
        let subject = VersionValidator::new(dir.path().join("no-file"));
        assert!(!subject.is_valid("1.2.0"));
    }

    #[test]
    fn test_invalid_if_file_does_not_match_emconf_structure() {
        let (_dir, path) = fixture("<?php\n\n$EM_CONF = 'foo';\n");
        let subject = VersionValidator::new(path);
        assert!(!subject.is_valid("1.0.0"));
    }

    #[test]
    fn test_invalid_if_no_version_given() {
        let (_dir, path) = fixture("<?php\n\n$EM_CONF[$_EXTKEY] = [\n    'title' => 'Test',\n];\n");
        let subject = VersionValidator::new(path);
        assert!(!subject.is_valid("1.0.0"));
    }

    #[test]
    fn test_valid_matches_version() {
        let (_dir, path) = fixture("<?php\n\n$EM_CONF[$_EXTKEY] = [\n    'title' => 'Test',\n    'version' => '1.0.0',\n];\n");
        let subject = VersionValidator::new(path);
        assert!(!subject.is_valid("1.2.0"));
        assert!(subject.is_valid("1.0.0"));
    }

    #[test]
    fn test_invalid_candidate_syntax() {
        let (_dir, path) = fixture("<?php\n$EM_CONF[$_EXTKEY] = ['version' => '1.0.0'];\n");
        let subject = VersionValidator::new(path);
        assert!(!subject.is_valid("1.0"));
        assert!(!subject.is_valid("latest"));
        assert!(!subject.is_valid(""));
    }

    #[test]
    fn test_is_publishable_version() {
        assert!(is_publishable_version("1.0.0"));
        assert!(is_publishable_version("12.4.100"));
        assert!(!is_publishable_version("1.0"));
        assert!(!is_publishable_version("1.0.0-beta"));
        assert!(!is_publishable_version("1000.0.0"));
        assert!(!is_publishable_version("v1.0.0"));
    }
}
