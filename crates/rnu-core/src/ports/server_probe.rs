//! Packager liveness probe port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the probe could determine about the packager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerState {
    /// A packager answered and identified itself.
    Running,
    /// Something answered on the port, but not recognisably a packager.
    Unrecognized,
    /// Nothing answered.
    NotRunning,
}

impl ServerState {
    /// Whether a new packager should be started.
    ///
    /// Only an unambiguous `NotRunning` triggers a spawn; an unrecognised
    /// responder is left alone and the launch continues optimistically.
    pub const fn needs_spawn(self) -> bool {
        matches!(self, Self::NotRunning)
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Unrecognized => "unrecognized",
            Self::NotRunning => "not_running",
        };
        f.write_str(s)
    }
}

/// Port for asking whether a packager is already listening.
///
/// Implementations never fail: any ambiguity is folded into
/// [`ServerState::Unrecognized`] and any transport error into
/// [`ServerState::NotRunning`].
#[async_trait]
pub trait ServerProbe: Send + Sync {
    /// Probe the packager at `host:port`.
    async fn probe(&self, host: &str, port: &str) -> ServerState;
}
