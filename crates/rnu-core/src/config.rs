//! Build configuration and launch settings.
//!
//! `BuildConfig` is the per-invocation record produced by the argument
//! resolver. It is built once and never mutated; the `with_*` builders
//! consume `self` so a configured value cannot change underneath the
//! orchestrator.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory under the project root that holds the native Ubuntu build.
pub const PLATFORM_DIR: &str = "ubuntu";

/// Build manifest whose presence marks a buildable project.
pub const BUILD_MANIFEST: &str = "CMakeLists.txt";

/// Run script generated by the build, relative to the build directory.
pub const RUN_SCRIPT: &str = "run-app.sh";

/// Shell command that configures and compiles the app.
pub const BUILD_COMMAND: &str = "cmake . && make";

/// Default packager host forwarded to the app.
pub const DEFAULT_PACKAGER_HOST: &str = "localhost";

/// Default packager port forwarded to the app.
pub const DEFAULT_PACKAGER_PORT: &str = "8081";

/// Terminal emulator used to host a freshly started packager.
pub const DEFAULT_TERMINAL: &str = "gnome-terminal";

/// Packager launch script, relative to the project root.
pub const PACKAGER_SCRIPT_RELATIVE: &str = "node_modules/react-native/packager/packager.sh";

/// Configuration for a single build-and-launch invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    root: PathBuf,
    live_reload: bool,
    host: String,
    port: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            live_reload: false,
            host: DEFAULT_PACKAGER_HOST.to_string(),
            port: DEFAULT_PACKAGER_PORT.to_string(),
        }
    }
}

impl BuildConfig {
    /// Create a configuration rooted at `root` with default packager settings.
    ///
    /// An empty root means "the current working directory".
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Enable or disable live reload in the launched app.
    #[must_use]
    pub const fn with_live_reload(mut self, enabled: bool) -> Self {
        self.live_reload = enabled;
        self
    }

    /// Set the packager host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the packager port.
    #[must_use]
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub const fn live_reload(&self) -> bool {
        self.live_reload
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    /// Host the packager probe connects to. An empty host is only dropped
    /// from the run script; the probe still targets the default.
    pub fn probe_host(&self) -> &str {
        if self.host.is_empty() {
            DEFAULT_PACKAGER_HOST
        } else {
            &self.host
        }
    }

    /// Port the packager probe connects to, defaulting when empty.
    pub fn probe_port(&self) -> &str {
        if self.port.is_empty() {
            DEFAULT_PACKAGER_PORT
        } else {
            &self.port
        }
    }
}

/// Settings for the packager spawn that are not forwarded to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSettings {
    /// Explicit packager script. `None` uses [`PACKAGER_SCRIPT_RELATIVE`]
    /// under the project root.
    pub packager_script: Option<PathBuf>,
    /// Terminal emulator that hosts the packager (invoked as `<terminal> -e <script>`).
    pub terminal: String,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            packager_script: None,
            terminal: DEFAULT_TERMINAL.to_string(),
        }
    }
}
