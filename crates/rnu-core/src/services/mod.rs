//! Application services.

mod launch;

pub use launch::{LaunchOrchestrator, LaunchReport};
