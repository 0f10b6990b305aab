//! Provisioner-specific error types.
//!
//! This module defines error types for startup and configuration loading
//! that are not covered by the server library's errors.

use pxe_server::{PxeError, ResolutionError};
use thiserror::Error;

/// Errors that can occur while starting the provisioner.
#[derive(Debug, Error)]
pub enum ProvisionerError {
    /// Invalid or missing configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be read
    #[error("Unable to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed
    #[error("Unable to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// The initial deployment manifest was rejected
    #[error("Initial deployment rejected: {0}")]
    Deployment(#[from] ResolutionError),

    /// Server error
    #[error("Server error: {0}")]
    Server(#[from] PxeError),

    /// Server run loop failed
    #[error("Server failed: {0}")]
    Run(#[from] anyhow::Error),
}
