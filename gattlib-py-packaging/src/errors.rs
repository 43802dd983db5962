//! This module contains the application's fatal error types.

use std::path::PathBuf;
use thiserror::Error;

/// Enumerates the application's custom unrecoverable errors. For every unrecoverable error type
/// encountered in the application, an entry should be added to this enum. Note: the
/// [thiserror](https://github.com/dtolnay/thiserror) library is used to derive the error details.
#[derive(Debug, Error)]
pub enum AppError {
    /// The project's `README.md` (the package's long description) could not be read.
    #[error("unable to read long description from '{}'", .path.display())]
    MissingReadme {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Represents a `git describe` query that could not be run or that exited abnormally. Only
    /// raised by strict resolution: the default resolution degrades to whatever output was captured.
    #[error("source control query failed: '{0}'")]
    SourceControlUnavailable(String),

    /// Strict resolution produced an empty version string.
    #[error("resolved version is empty")]
    EmptyVersion,

    /// Represents a configuration entry with an unusable value.
    #[error("invalid configuration value for '{key}': {reason}")]
    ConfigInvalid { key: &'static str, reason: String },
}
