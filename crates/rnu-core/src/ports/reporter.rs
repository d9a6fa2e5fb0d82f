//! Reporter port for user-facing launch messages.
//!
//! The orchestrator describes what is happening as [`LaunchEvent`]s; the
//! adapter decides how to render them (colored terminal lines in the CLI,
//! nothing at all in tests).

use std::path::PathBuf;

use super::ServerState;

/// Something the user should be told about during a launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchEvent {
    /// The project gate failed.
    ProjectNotFound {
        manifest: PathBuf,
        platform: String,
    },
    /// The project root could not be resolved at all.
    ProjectUnreadable { root: PathBuf, reason: String },
    /// The probe finished; tells the user what will happen to the packager.
    PackagerState(ServerState),
    /// The detached packager could not be started. The launch continues.
    PackagerSpawnFailed { reason: String },
    Building,
    BuildFailed { stdout: Vec<u8>, stderr: Vec<u8> },
    StartingApp,
    RunFailed { stdout: Vec<u8>, stderr: Vec<u8> },
}

/// Port for surfacing launch events to the user.
///
/// Implementations should not block for long; they are called inline
/// between launch steps.
pub trait LaunchReporter: Send + Sync {
    fn report(&self, event: LaunchEvent);
}

/// A reporter that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopReporter;

impl NoopReporter {
    pub const fn new() -> Self {
        Self
    }
}

impl LaunchReporter for NoopReporter {
    fn report(&self, _event: LaunchEvent) {
        // Intentionally do nothing
    }
}
