//! Error handling for the tailor application
//!
//! This module provides a hierarchical error system with user-friendly
//! messages. Request failures never leave the request service as errors; they
//! are rendered and turned into exit codes. Everything else flows through
//! `TailorError`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TailorError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extension metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request rejected by server with status {status}")]
    Rejected { status: u16, body: serde_json::Value },

    #[error("Missing credentials for {method} authentication")]
    MissingCredentials { method: String },

    #[error("Could not read upload {path}: {source}")]
    Upload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Reasons an `ext_emconf.php` file does not yield a version.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Metadata file could not be read: {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Metadata file does not declare $EM_CONF[$_EXTKEY]: {path}")]
    Malformed { path: PathBuf },

    #[error("Metadata file does not declare a version: {path}")]
    VersionMissing { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, TailorError>;

impl From<std::io::Error> for TailorError {
    fn from(err: std::io::Error) -> Self {
        TailorError::FileSystem(FileSystemError::Io(err))
    }
}

impl From<toml::de::Error> for TailorError {
    fn from(err: toml::de::Error) -> Self {
        TailorError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<reqwest::Error> for TailorError {
    fn from(err: reqwest::Error) -> Self {
        TailorError::Network(NetworkError::Transport(err))
    }
}
