//! Read-only lookups of public extension data

pub mod details;
pub mod find;
pub mod version;
pub mod versions;
