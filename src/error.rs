//! Domain-specific error types for the ojdeploy runner.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors (e.g., [`ConfigError`], [`ExecError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! OjdeployError
//! ├── Config(ConfigError)     : mutual exclusion, flag table, config files
//! ├── Platform(PlatformError) : unsupported operating system
//! └── Exec(ExecError)         : launch, log file, timeout, exit code
//! ```

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Top-level error type returned by [`Deployer::execute`](crate::deploy::Deployer::execute).
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum OjdeployError {
    /// The configuration is invalid or could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The host operating system cannot run ojdeploy.
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Running ojdeploy failed.
    #[error("Execution error: {0}")]
    Exec(#[from] ExecError),
}

/// Errors that arise from configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// More than one of `buildFile`, `buildFileSchema` and `profile` is set.
    #[error(
        "Mutually exclusive parameters given ({}): only one of 'buildFile', 'profile' or 'buildFileSchema' may be set",
        .0.join(", ")
    )]
    MutuallyExclusive(Vec<&'static str>),

    /// The bundled flag mapping table is malformed or incomplete.
    #[error("Invalid flag mapping table: {0}")]
    FlagTable(String),

    /// A configuration file contains invalid TOML or unknown keys.
    #[error("Invalid configuration file {path}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        path: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from platform detection.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Neither a Windows nor a Linux operating system name.
    #[error("Operating system '{os}' is not supported")]
    Unsupported {
        /// The OS name as reported by the host.
        os: String,
    },
}

/// Errors that arise while running the deploy tool.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The process could not be started (binary missing, permission denied, ...).
    #[error("Failed to launch {program}: {source}")]
    Launch {
        /// Program that was being started.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The build log file could not be created.
    #[error("Failed to open build log {}: {source}", .path.display())]
    LogFile {
        /// Path of the log file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Waiting on the running process failed.
    #[error("Failed waiting for {program}: {source}")]
    Wait {
        /// Program being waited on.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The process ran longer than the watchdog allowed and was killed.
    #[error("{program} timed out after {}s and was terminated", .timeout.as_secs())]
    Timeout {
        /// Program that was killed.
        program: String,
        /// Watchdog duration.
        timeout: Duration,
    },

    /// The process finished with an exit code other than the expected one.
    #[error("{program} exited with {} (expected {expected})", describe_code(.actual))]
    UnexpectedExitCode {
        /// Program that ran.
        program: String,
        /// Exit code the process was expected to return.
        expected: i32,
        /// Actual exit code, `None` if the process was terminated by a signal.
        actual: Option<i32>,
    },
}

#[allow(clippy::ref_option)]
fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |c| format!("code {c}"),
    )
}
