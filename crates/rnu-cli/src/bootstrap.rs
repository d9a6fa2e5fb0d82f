//! CLI composition root.
//!
//! Resolves parsed arguments into domain configuration and wires the
//! runtime adapters into a [`LaunchOrchestrator`]. This is the only place
//! concrete probe and launcher types are named.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use rnu_core::{BuildConfig, LaunchOrchestrator, LaunchSettings, ProjectLocator};
use rnu_runtime::{HttpPackagerProbe, SystemProcessLauncher};

use crate::parser::Cli;
use crate::presentation::ConsoleReporter;

/// Everything the CLI resolved from flags, environment and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub build: BuildConfig,
    pub settings: LaunchSettings,
    pub probe_timeout: Duration,
}

impl CliConfig {
    /// Configuration with every option at its default.
    pub fn with_defaults() -> Self {
        Self {
            build: BuildConfig::default(),
            settings: LaunchSettings::default(),
            probe_timeout: rnu_runtime::DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        let build = BuildConfig::new(cli.root.clone().unwrap_or_default())
            .with_live_reload(cli.live_reload)
            .with_host(cli.host.clone())
            .with_port(cli.port.clone());

        let settings = LaunchSettings {
            packager_script: cli.packager_script.clone(),
            terminal: cli.terminal.clone(),
        };

        Self {
            build,
            settings,
            probe_timeout: Duration::from_secs(cli.probe_timeout),
        }
    }
}

/// Wired dependencies for command handlers.
pub struct CliContext {
    pub config: CliConfig,
    pub orchestrator: LaunchOrchestrator,
}

/// Build the CLI context from resolved configuration.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let probe = HttpPackagerProbe::with_timeout(config.probe_timeout)
        .context("Failed to create packager probe")?;

    let orchestrator =
        LaunchOrchestrator::new(Arc::new(probe), Arc::new(SystemProcessLauncher::new()))
            .with_locator(ProjectLocator::current())
            .with_reporter(Arc::new(ConsoleReporter::new()))
            .with_settings(config.settings.clone());

    Ok(CliContext {
        config,
        orchestrator,
    })
}
