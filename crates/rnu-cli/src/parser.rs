//! Main CLI parser.
//!
//! `run-ubuntu` is a single command, so every option lives on the root
//! parser. Values can also come from `RNU_*` environment variables (or a
//! `.env` file loaded before parsing).

use clap::Parser;
use std::path::PathBuf;

use rnu_core::{DEFAULT_PACKAGER_HOST, DEFAULT_PACKAGER_PORT, DEFAULT_TERMINAL};

/// Build the Ubuntu app and start it, launching the JS packager if needed.
#[derive(Debug, Parser)]
#[command(name = "run-ubuntu")]
#[command(about = "Build and run a React Native app on Ubuntu")]
#[command(version)]
pub struct Cli {
    /// Override the root directory for the ubuntu build (which contains the ubuntu directory)
    #[arg(long, env = "RNU_ROOT")]
    pub root: Option<PathBuf>,

    /// Start with live reloading enabled
    #[arg(long = "live-reload")]
    pub live_reload: bool,

    /// Set packager host
    #[arg(long, env = "RNU_PACKAGER_HOST", default_value = DEFAULT_PACKAGER_HOST)]
    pub host: String,

    /// Set packager port
    #[arg(long, env = "RNU_PACKAGER_PORT", default_value = DEFAULT_PACKAGER_PORT)]
    pub port: String,

    /// Packager script to launch when no packager is running
    /// [default: <root>/node_modules/react-native/packager/packager.sh]
    #[arg(long = "packager", env = "RNU_PACKAGER_SCRIPT")]
    pub packager_script: Option<PathBuf>,

    /// Terminal emulator that hosts a newly started packager
    #[arg(long, env = "RNU_TERMINAL", default_value = DEFAULT_TERMINAL)]
    pub terminal: String,

    /// Seconds to wait for the packager status check
    #[arg(long = "probe-timeout", env = "RNU_PROBE_TIMEOUT", default_value_t = 2)]
    pub probe_timeout: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
