//! Local management commands

pub mod config;
