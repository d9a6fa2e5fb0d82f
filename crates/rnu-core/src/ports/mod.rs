//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define what the orchestrator expects from the outside world.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `std::process::Command` types in any signature
//! - The probe is the only async port; subprocess steps block
//! - User-facing output goes through [`LaunchReporter`], never `println!` in core

pub mod process_launcher;
pub mod reporter;
pub mod server_probe;

pub use process_launcher::{CommandSpec, ProcessError, ProcessLauncher, ProcessOutcome};
pub use reporter::{LaunchEvent, LaunchReporter, NoopReporter};
pub use server_probe::{ServerProbe, ServerState};
