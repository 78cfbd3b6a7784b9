//! Error types for loki-setup operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SetupError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors
//! - Provisioning is fail-fast: the first stage error aborts the whole run
//!   with no cleanup of partially created state

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for loki-setup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Invalid flag combination, detected before any side effect.
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// A caller-supplied virtual environment path does not exist.
    #[error("Virtual environment not found: {path}")]
    VenvNotFound { path: PathBuf },

    /// Shell command failed or could not be spawned.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A provisioning stage failed.
    #[error("Stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },

    /// A download could not be completed.
    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// A downloaded artifact did not match its pinned digest.
    #[error("Checksum mismatch for {artifact}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },

    /// An installed Python package could not be located inside the venv.
    #[error("Package '{package}' not found in virtual environment")]
    PackageNotFound { package: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for loki-setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_options_displays_message() {
        let err = SetupError::InvalidOptions {
            message: "--with-max requires --ecmwf".into(),
        };
        assert!(err.to_string().contains("--with-max requires --ecmwf"));
    }

    #[test]
    fn venv_not_found_displays_path() {
        let err = SetupError::VenvNotFound {
            path: PathBuf::from("/opt/loki_env"),
        };
        assert!(err.to_string().contains("/opt/loki_env"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = SetupError::CommandFailed {
            command: "pip install -e .".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("pip install -e ."));
        assert!(msg.contains("1"));
    }

    #[test]
    fn stage_failed_displays_stage_and_message() {
        let err = SetupError::StageFailed {
            stage: "claw".into(),
            message: "cmake configure failed".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("claw"));
        assert!(msg.contains("cmake configure failed"));
    }

    #[test]
    fn checksum_mismatch_displays_digests() {
        let err = SetupError::ChecksumMismatch {
            artifact: "NetRexx.jar".into(),
            expected: "abcd".into(),
            actual: "ef01".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("NetRexx.jar"));
        assert!(msg.contains("abcd"));
        assert!(msg.contains("ef01"));
    }

    #[test]
    fn package_not_found_displays_package() {
        let err = SetupError::PackageNotFound {
            package: "open_fortran_parser".into(),
        };
        assert!(err.to_string().contains("open_fortran_parser"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
    }
}
