//! Core functionality modules
//!
//! - `command`: shared execution of API commands
//! - `dto`: request configuration and messages
//! - `services`: transport, request execution and output formatting
//! - `metadata`: `ext_emconf.php` and documentation settings
//! - `validation`: version numbers and extension keys

pub mod command;
pub mod dto;
pub mod metadata;
pub mod services;
pub mod validation;
