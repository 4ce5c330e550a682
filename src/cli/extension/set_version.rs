use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::metadata::{DocumentationVersion, EmConf};
use crate::core::validation::is_publishable_version;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SetVersionArgs {
    /// The new version, e.g. 1.2.3
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Path to the extension directory
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Leave the documentation settings untouched
    #[arg(long)]
    pub no_docs: bool,
}

/// Write the version into `ext_emconf.php` and the documentation settings
pub fn set_version(args: &SetVersionArgs, output: &mut dyn Write) -> io::Result<i32> {
    let version = args.version.trim();
    if !is_publishable_version(version) {
        writeln!(
            output,
            "[ERROR] No valid version number given: '{}'. Use the format x.y.z",
            version
        )?;
        return Ok(1);
    }

    let emconf = EmConf::in_directory(&args.path);
    if let Err(e) = emconf.write_version(version) {
        warn!("Could not update {}: {}", emconf.path().display(), e);
        writeln!(output, "[ERROR] Could not set version {}. Reason: {}", version, e)?;
        return Ok(1);
    }
    info!("Updated {}", emconf.path().display());

    if !args.no_docs {
        match DocumentationVersion::new(&args.path).update(version) {
            Ok(files) => {
                for file in files {
                    info!("Updated {}", file.display());
                }
            }
            Err(e) => {
                writeln!(
                    output,
                    "[ERROR] Version {} set in ext_emconf.php, but the documentation could not be updated. Reason: {}",
                    version, e
                )?;
                return Ok(1);
            }
        }
    }

    writeln!(output, "[OK] Version successfully set to {}.", version)?;
    Ok(0)
}

pub async fn execute(args: SetVersionArgs) -> Result<i32> {
    let mut stdout = io::stdout();
    Ok(set_version(&args, &mut stdout)?)
}
