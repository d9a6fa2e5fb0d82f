//! Process launcher port.
//!
//! Subprocess steps are described by a [`CommandSpec`] that carries its own
//! working directory, so nothing in the launch flow mutates the process-wide
//! current directory.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from starting a detached process.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be spawned.
    #[error("Failed to spawn {program}: {reason}")]
    SpawnFailed { program: String, reason: String },
}

/// A command to run: program, arguments and optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: PathBuf,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the command from `dir` instead of the caller's directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of a blocking subprocess step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Success,
    /// The step failed. `stdout`/`stderr` hold whatever was captured; when
    /// the child inherited the terminal they are usually empty because the
    /// output was already shown live.
    Failure {
        exit_code: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    },
}

impl ProcessOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Failure for a process that never started.
    pub fn spawn_error(program: &Path, err: &std::io::Error) -> Self {
        Self::Failure {
            exit_code: None,
            stdout: Vec::new(),
            stderr: format!("failed to start {}: {err}", program.display()).into_bytes(),
        }
    }
}

/// Port for running external commands.
pub trait ProcessLauncher: Send + Sync {
    /// Run `spec` to completion, inheriting the caller's stdio.
    ///
    /// Blocks until the child exits. There is no timeout.
    fn run(&self, spec: &CommandSpec) -> ProcessOutcome;

    /// Start `spec` detached and return immediately.
    ///
    /// No handle is kept: the child is not awaited, monitored or tied to the
    /// caller's lifetime.
    fn spawn_detached(&self, spec: &CommandSpec) -> Result<(), ProcessError>;
}
