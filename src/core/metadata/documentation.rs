//! Release numbers in the extension documentation.
//!
//! Rendered documentation carries the version twice: `version` is
//! `major.minor`, `release` is the full version. Older extensions keep them
//! in `Documentation/Settings.cfg`, newer ones in `Documentation/guides.xml`.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::error::Result;

const SETTINGS_CFG: &str = "Documentation/Settings.cfg";
const GUIDES_XML: &str = "Documentation/guides.xml";

struct Patterns {
    cfg_release: Regex,
    cfg_version: Regex,
    xml_release: Regex,
    xml_version: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        cfg_release: Regex::new(r"(?m)^(?P<prefix>[ \t]*release[ \t]*=[ \t]*)[^\r\n]*")
            .expect("valid release pattern"),
        cfg_version: Regex::new(r"(?m)^(?P<prefix>[ \t]*version[ \t]*=[ \t]*)[^\r\n]*")
            .expect("valid version pattern"),
        xml_release: Regex::new(r#"(?P<prefix><project\b[^>]*?\brelease=")[^"]*""#)
            .expect("valid release attribute pattern"),
        xml_version: Regex::new(r#"(?P<prefix><project\b[^>]*?\bversion=")[^"]*""#)
            .expect("valid version attribute pattern"),
    })
}

/// `1.2.3` → `1.2`
pub fn short_version(version: &str) -> String {
    version.split('.').take(2).collect::<Vec<_>>().join(".")
}

/// Updates documentation release numbers below an extension directory
pub struct DocumentationVersion {
    root: PathBuf,
}

impl DocumentationVersion {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Rewrite every documentation file that exists; returns the files touched
    pub fn update(&self, version: &str) -> Result<Vec<PathBuf>> {
        let short = short_version(version);
        let p = patterns();
        let mut updated = Vec::new();

        let settings = self.root.join(SETTINGS_CFG);
        if settings.is_file() {
            let content = fs::read_to_string(&settings)?;
            let content = p.cfg_release.replace_all(&content, format!("${{prefix}}{}", version));
            let content = p.cfg_version.replace_all(&content, format!("${{prefix}}{}", short));
            fs::write(&settings, content.as_ref())?;
            updated.push(settings);
        } else {
            debug!("No {} found", SETTINGS_CFG);
        }

        let guides = self.root.join(GUIDES_XML);
        if guides.is_file() {
            let content = fs::read_to_string(&guides)?;
            let content = p.xml_release.replace_all(&content, format!("${{prefix}}{}\"", version));
            let content = p.xml_version.replace_all(&content, format!("${{prefix}}{}\"", short));
            fs::write(&guides, content.as_ref())?;
            updated.push(guides);
        } else {
            debug!("No {} found", GUIDES_XML);
        }

        for path in &updated {
            info!("Updated documentation version in {}", path.display());
        }

        Ok(updated)
    }
}
