//! Error types for the CLI.
//!
//! Every pipeline stage has its own error enum in `options-gen-core`; this
//! module aggregates them under one top-level type so `main` can print a
//! single diagnostic and pick an exit code.

use std::path::PathBuf;
use thiserror::Error;

use options_gen_core::{ExtractError, RenderError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid flag or environment configuration.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error during spec extraction.
    #[error("Failed to extract option spec: {0}")]
    Extract(#[from] ExtractError),

    /// Error rendering the output source.
    #[error("Failed to render output: {0}")]
    Render(#[from] RenderError),

    /// Error writing the output file.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),
}

/// Invalid flag or environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required input is empty and has no environment fallback.
    #[error("Missing required value for '{flag}' (set the flag or {env})")]
    MissingWithEnv { flag: String, env: String },

    /// A required input is empty.
    #[error("Missing required value for '{flag}'")]
    Missing { flag: String },

    /// Unparseable `--defaults-from` value.
    #[error("Invalid --defaults-from value '{value}': expected none, tag[=name], var[=name], or func[=name]")]
    BadDefaultsFrom { value: String },

    /// Setter type name override failed the validity pattern.
    #[error("Invalid --out-setter-name '{name}': only letters are allowed")]
    BadSetterName { name: String },

    /// An exclusion pattern did not compile.
    #[error("Invalid exclusion pattern '{pattern}': {message}")]
    BadExclude { pattern: String, message: String },
}

/// Error writing the output file.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to write the file contents.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to set the file permissions.
    #[error("Failed to set permissions on {path}: {source}")]
    SetPermissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create a missing-value error with an environment fallback hint.
    pub fn missing_with_env(flag: impl Into<String>, env: impl Into<String>) -> Self {
        Self::MissingWithEnv {
            flag: flag.into(),
            env: env.into(),
        }
    }

    /// Create a missing-value error.
    pub fn missing(flag: impl Into<String>) -> Self {
        Self::Missing { flag: flag.into() }
    }

    /// Create a bad exclusion pattern error.
    pub fn bad_exclude(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadExclude {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
