#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

pub mod launcher;
pub mod probe;

pub use launcher::SystemProcessLauncher;
pub use probe::{DEFAULT_PROBE_TIMEOUT, HttpPackagerProbe, PACKAGER_RUNNING_BODY, ProbeError};
