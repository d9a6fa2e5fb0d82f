//! `std::process` implementation of the process launcher port.

use rnu_core::ports::{CommandSpec, ProcessError, ProcessLauncher, ProcessOutcome};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs commands as real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemProcessLauncher;

impl SystemProcessLauncher {
    pub const fn new() -> Self {
        Self
    }
}

fn command_for(spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(spec.program());
    cmd.args(spec.arguments());
    if let Some(dir) = spec.working_dir() {
        cmd.current_dir(dir);
    }
    cmd
}

impl ProcessLauncher for SystemProcessLauncher {
    fn run(&self, spec: &CommandSpec) -> ProcessOutcome {
        let mut cmd = command_for(spec);

        // Set up stdio to inherit from parent so build output streams live
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        match cmd.status() {
            Ok(status) if status.success() => ProcessOutcome::Success,
            Ok(status) => {
                debug!(command = %spec, code = ?status.code(), "process exited unsuccessfully");
                ProcessOutcome::Failure {
                    exit_code: status.code(),
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                }
            }
            Err(e) => ProcessOutcome::spawn_error(spec.program(), &e),
        }
    }

    fn spawn_detached(&self, spec: &CommandSpec) -> Result<(), ProcessError> {
        let mut cmd = command_for(spec);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Own process group: Ctrl+C in our terminal must not reach the packager
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd.spawn().map_err(|e| ProcessError::SpawnFailed {
            program: spec.program().display().to_string(),
            reason: e.to_string(),
        })?;
        debug!(command = %spec, pid = child.id(), "detached process started");

        // Dropping a std Child neither kills nor waits for it
        drop(child);
        Ok(())
    }
}
