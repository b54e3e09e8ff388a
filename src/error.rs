//! Error handling for changeme.
//! Defines the error type and result alias used throughout the application.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::assets::{AssetStep, Platform};

/// All failures that can stop a changeme run.
///
/// Every variant that concerns a filesystem entry carries its path so the
/// user can see exactly where the run stopped.
#[derive(Error, Debug)]
pub enum Error {
    /// A required external value (remote, email, description) could not be derived.
    #[error("Configuration resolution error: {0}.")]
    ConfigResolutionError(String),

    /// The settings file exists but could not be parsed.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Read, write or rename failure on a specific path.
    #[error("IO error at '{}': {source}.", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A rename target already exists.
    #[error("Rename conflict: '{}' already exists (renaming '{}').", to.display(), from.display())]
    RenameConflict { from: PathBuf, to: PathBuf },

    /// One or more renames failed after every rename was attempted.
    #[error("{count} path(s) could not be renamed.")]
    RenameFailed { count: usize },

    /// Bundle discovery did not yield exactly one directory.
    #[error("Expected exactly one {platform} bundle matching '{pattern}', found {}.", matches.len())]
    AmbiguousBundleMatch {
        platform: Platform,
        pattern: String,
        matches: Vec<PathBuf>,
    },

    /// Decoding, resizing or encoding an image failed.
    #[error("Image error at '{}': {source}.", path.display())]
    ImageError {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An asset pipeline step failed.
    #[error("Asset pipeline failed at step '{step}': {source}")]
    AssetStepError {
        step: AssetStep,
        #[source]
        source: Box<Error>,
    },

    /// Invalid denylist glob.
    #[error("Ignore pattern error: {0}.")]
    IgnoreError(String),

    /// Invalid bundle discovery pattern.
    #[error("Glob pattern error: {0}.")]
    GlobPatternError(#[from] glob::PatternError),
}

impl Error {
    /// Wraps an `io::Error` together with the path it happened on.
    pub fn io<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::IoError { path: path.as_ref().to_path_buf(), source }
    }
}

/// Convenience type alias for Results with `Error` as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
