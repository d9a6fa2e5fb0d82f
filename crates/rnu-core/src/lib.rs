#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod ports;
pub mod project;
pub mod run_args;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{
    BUILD_COMMAND, BUILD_MANIFEST, BuildConfig, DEFAULT_PACKAGER_HOST, DEFAULT_PACKAGER_PORT,
    DEFAULT_TERMINAL, LaunchSettings, PACKAGER_SCRIPT_RELATIVE, PLATFORM_DIR, RUN_SCRIPT,
};
pub use error::LaunchError;
pub use ports::{
    CommandSpec, LaunchEvent, LaunchReporter, NoopReporter, ProcessError, ProcessLauncher,
    ProcessOutcome, ServerProbe, ServerState,
};
pub use project::{ProjectLayout, ProjectLocator, SUPPORTED_PLATFORM};
pub use run_args::run_script_args;
pub use services::{LaunchOrchestrator, LaunchReport};
pub use state::{LaunchState, StateTrace};
