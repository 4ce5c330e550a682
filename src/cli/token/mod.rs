//! Access token commands

pub mod create;
pub mod refresh;
pub mod revoke;
