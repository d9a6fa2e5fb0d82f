//! Command handlers.
//!
//! Handlers are thin wrappers that call into the core orchestrator and
//! translate its result for the terminal. They contain no launch logic.

pub mod run;
