//! CLI-specific error types and mappings.
//!
//! This module maps [`LaunchError`] to exit codes. The user has already seen
//! a diagnostic from the reporter by the time one of these surfaces.

use rnu_core::LaunchError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No buildable project at the resolved root.
    #[error("{0}")]
    ProjectNotFound(String),

    /// Host platform is outside the supported family.
    #[error("{0}")]
    UnsupportedPlatform(String),

    /// Native build failed.
    #[error("{0}")]
    Build(String),

    /// Run script failed.
    #[error("{0}")]
    Run(String),

    /// IO error (cwd unavailable, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error (the app itself failed to start)
    /// - 2: Misuse of shell command (reported by clap before we get here)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Run(_) => 1,
            Self::ProjectNotFound(_) => 66,     // EX_NOINPUT
            Self::UnsupportedPlatform(_) => 69, // EX_UNAVAILABLE
            Self::Build(_) => 70,               // EX_SOFTWARE
            Self::Io(_) => 71,                  // EX_OSERR
        }
    }
}

impl From<LaunchError> for CliError {
    fn from(err: LaunchError) -> Self {
        let msg = err.to_string();
        match err {
            LaunchError::ProjectNotFound { .. } => Self::ProjectNotFound(msg),
            LaunchError::UnsupportedPlatform { .. } => Self::UnsupportedPlatform(msg),
            LaunchError::BuildFailed { .. } => Self::Build(msg),
            LaunchError::RunFailed { .. } => Self::Run(msg),
            LaunchError::Io(_) => Self::Io(msg),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
