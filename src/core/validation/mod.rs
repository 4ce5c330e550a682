//! Validation of user input against TER rules and local extension files

pub mod extension_key;
pub mod version;

pub use extension_key::resolve_extension_key;
pub use version::{is_publishable_version, VersionValidator};
