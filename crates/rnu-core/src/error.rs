//! Launch error type.

use std::path::PathBuf;
use thiserror::Error;

use crate::state::LaunchState;

/// Errors that end a launch.
///
/// Every failing path resolves to one of these; none is swallowed. By the
/// time a caller sees one, the reporter has already shown the user a
/// diagnostic, so adapters only need to map it to an exit status.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The build manifest is missing under the project root.
    #[error("Ubuntu project not found: {} does not exist", manifest.display())]
    ProjectNotFound {
        /// Manifest path that was checked
        manifest: PathBuf,
    },

    /// The host platform is not in the supported family.
    #[error("Unsupported platform '{platform}': Ubuntu builds require linux")]
    UnsupportedPlatform {
        /// Platform identifier that was checked
        platform: String,
    },

    /// The native build command failed.
    #[error("Could not build the app (exit code: {exit_code:?})")]
    BuildFailed { exit_code: Option<i32> },

    /// The generated run script failed.
    #[error("Could not start the app (exit code: {exit_code:?})")]
    RunFailed { exit_code: Option<i32> },

    /// The project root could not be resolved.
    #[error("Failed to resolve project root: {0}")]
    Io(#[from] std::io::Error),
}

impl LaunchError {
    /// State the orchestrator was left in when this error was raised.
    ///
    /// Precondition failures never leave `Idle`; subprocess failures end
    /// in `Aborted`.
    pub const fn terminal_state(&self) -> LaunchState {
        match self {
            Self::ProjectNotFound { .. } | Self::UnsupportedPlatform { .. } | Self::Io(_) => {
                LaunchState::Idle
            }
            Self::BuildFailed { .. } | Self::RunFailed { .. } => LaunchState::Aborted,
        }
    }

    /// Whether the project gate rejected the invocation.
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::ProjectNotFound { .. } | Self::UnsupportedPlatform { .. }
        )
    }
}
