//! Terminal rendering of launch events.

use console::style;
use rnu_core::ports::{LaunchEvent, LaunchReporter, ServerState};
use std::io::Write;

/// Prints launch events as styled terminal lines.
///
/// Warnings go to stderr; everything else to stdout. Captured subprocess
/// output is written raw after the failure line.
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub const fn new() -> Self {
        Self
    }
}

/// Plain-text message for an event, without styling.
pub fn message_for(event: &LaunchEvent) -> &'static str {
    match event {
        LaunchEvent::ProjectNotFound { .. } => {
            "Ubuntu project not found. Maybe run react-native ubuntu first?"
        }
        LaunchEvent::ProjectUnreadable { .. } => "Could not read the project directory.",
        LaunchEvent::PackagerState(ServerState::Running) => "JS server already running.",
        LaunchEvent::PackagerState(ServerState::Unrecognized) => {
            "JS server not recognized, continuing with build..."
        }
        LaunchEvent::PackagerState(ServerState::NotRunning) => "Starting JS server...",
        LaunchEvent::PackagerSpawnFailed { .. } => {
            "Could not start the JS server in a new window, continuing with build..."
        }
        LaunchEvent::Building => "Building the app...",
        LaunchEvent::BuildFailed { .. } => "Could not build the app, see the error above.",
        LaunchEvent::StartingApp => "Starting the app...",
        LaunchEvent::RunFailed { .. } => "Could not start the app, see the error above.",
    }
}

fn print_captured(stdout: &[u8], stderr: &[u8]) {
    if !stdout.is_empty() {
        let _ = std::io::stdout().write_all(stdout);
        println!();
    }
    if !stderr.is_empty() {
        let _ = std::io::stderr().write_all(stderr);
        eprintln!();
    }
}

impl LaunchReporter for ConsoleReporter {
    fn report(&self, event: LaunchEvent) {
        let message = message_for(&event);
        match &event {
            LaunchEvent::ProjectNotFound { manifest, platform } => {
                println!("{}", style(message).red());
                println!(
                    "{}",
                    style(format!(
                        "  looked for {} on platform '{platform}'",
                        manifest.display()
                    ))
                    .dim()
                );
            }
            LaunchEvent::ProjectUnreadable { root, reason } => {
                eprintln!("{}", style(message).red());
                eprintln!(
                    "{}",
                    style(format!("  {}: {reason}", root.display())).dim()
                );
            }
            LaunchEvent::PackagerState(ServerState::Unrecognized) => {
                eprintln!("{}", style(message).yellow());
            }
            LaunchEvent::PackagerSpawnFailed { reason } => {
                eprintln!("{}", style(message).yellow());
                eprintln!("{}", style(format!("  {reason}")).dim());
            }
            LaunchEvent::BuildFailed { stdout, stderr }
            | LaunchEvent::RunFailed { stdout, stderr } => {
                println!("{}", style(message).red());
                print_captured(stdout, stderr);
            }
            LaunchEvent::PackagerState(_) | LaunchEvent::Building | LaunchEvent::StartingApp => {
                println!("{}", style(message).bold());
            }
        }
    }
}
