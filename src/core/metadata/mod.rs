//! Extension metadata files: `ext_emconf.php` and the documentation settings

pub mod documentation;
pub mod emconf;

pub use documentation::DocumentationVersion;
pub use emconf::EmConf;
