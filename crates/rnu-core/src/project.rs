//! Project detection.
//!
//! A project is buildable when `<root>/ubuntu/CMakeLists.txt` exists and
//! the host belongs to the linux platform family.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{
    BUILD_COMMAND, BUILD_MANIFEST, BuildConfig, PACKAGER_SCRIPT_RELATIVE, PLATFORM_DIR, RUN_SCRIPT,
};
use crate::error::LaunchError;
use crate::ports::CommandSpec;

/// Platform family prefix accepted by the locator.
pub const SUPPORTED_PLATFORM: &str = "linux";

/// Checks whether a configuration points at a buildable project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocator {
    platform: String,
}

impl Default for ProjectLocator {
    fn default() -> Self {
        Self::current()
    }
}

impl ProjectLocator {
    /// Locator for the platform this binary was compiled for.
    pub fn current() -> Self {
        Self::for_platform(std::env::consts::OS)
    }

    /// Locator that reports `platform` as the host identifier.
    pub fn for_platform(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn is_supported_platform(&self) -> bool {
        self.platform.to_lowercase().starts_with(SUPPORTED_PLATFORM)
    }

    /// Whether `config` is ready to build.
    pub fn is_ready(&self, config: &BuildConfig) -> bool {
        self.locate(config).is_ok()
    }

    /// Resolve the project layout, or explain why it is not buildable.
    ///
    /// The manifest is checked before the platform so a missing project is
    /// reported as such even on an unsupported host.
    pub fn locate(&self, config: &BuildConfig) -> Result<ProjectLayout, LaunchError> {
        let layout = ProjectLayout::resolve(config.root())?;
        let manifest = layout.manifest_path();

        if !manifest.is_file() {
            debug!(manifest = %manifest.display(), "build manifest missing");
            return Err(LaunchError::ProjectNotFound { manifest });
        }

        if !self.is_supported_platform() {
            debug!(platform = %self.platform, "platform not supported");
            return Err(LaunchError::UnsupportedPlatform {
                platform: self.platform.clone(),
            });
        }

        Ok(layout)
    }
}

/// Absolute paths of a located project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Resolve `root` to an absolute path. An empty root is the current
    /// working directory.
    pub fn resolve(root: &Path) -> std::io::Result<Self> {
        let root = if root.as_os_str().is_empty() {
            std::env::current_dir()?
        } else {
            std::path::absolute(root)?
        };
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/ubuntu`, the working directory for build and run.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(PLATFORM_DIR)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.build_dir().join(BUILD_MANIFEST)
    }

    pub fn run_script(&self) -> PathBuf {
        self.build_dir().join(RUN_SCRIPT)
    }

    pub fn default_packager_script(&self) -> PathBuf {
        self.root.join(PACKAGER_SCRIPT_RELATIVE)
    }

    /// `sh -c "cmake . && make"` in the build directory.
    pub fn build_command(&self) -> CommandSpec {
        CommandSpec::new("sh")
            .arg("-c")
            .arg(BUILD_COMMAND)
            .current_dir(self.build_dir())
    }

    /// The generated run script with `args`, in the build directory.
    pub fn run_command(&self, args: Vec<String>) -> CommandSpec {
        CommandSpec::new(self.run_script())
            .args(args)
            .current_dir(self.build_dir())
    }
}
