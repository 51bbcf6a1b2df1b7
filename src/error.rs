//! # Error Handling
//!
//! Centralized error type for the `docsync` application, built on
//! `thiserror`. Each variant corresponds to a distinct failure mode and
//! carries enough context to produce a useful message.
//!
//! Two classes of failure are deliberately *not* represented here:
//!
//! - Structural warnings (missing nav header, missing marker, missing
//!   template, empty source directory). These are logged with `log::warn!`
//!   and the affected step is skipped; they never abort a source.
//! - Per-source failures crossing the source boundary. The pipeline catches
//!   an `Error` per source, reports it, and continues with the siblings.

use thiserror::Error;

/// Main error type for docsync operations
#[derive(Error, Debug)]
pub enum Error {
    /// The sync configuration is missing, malformed, or inconsistent.
    ///
    /// This is always fatal and always raised before any network action.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An error occurred while cloning a source repository.
    #[error("Git clone error for {url}@{branch}: {message}")]
    GitClone {
        url: String,
        branch: String,
        message: String,
    },

    /// A git subcommand exited non-zero.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
