//! Run-script flag mapping.
//!
//! Each entry maps one `BuildConfig` field to an optional CLI token. The
//! table order is the order tokens appear on the run script's command line.

use tracing::debug;

use crate::config::BuildConfig;

struct RunFlag {
    name: &'static str,
    token: fn(&BuildConfig) -> Option<String>,
}

const RUN_FLAGS: [RunFlag; 3] = [
    RunFlag {
        name: "live-reload",
        token: live_reload_token,
    },
    RunFlag {
        name: "host",
        token: host_token,
    },
    RunFlag {
        name: "port",
        token: port_token,
    },
];

fn live_reload_token(config: &BuildConfig) -> Option<String> {
    config.live_reload().then(|| "--live-reload".to_string())
}

fn host_token(config: &BuildConfig) -> Option<String> {
    non_empty(config.host()).map(|host| format!("--host={host}"))
}

fn port_token(config: &BuildConfig) -> Option<String> {
    non_empty(config.port()).map(|port| format!("--port={port}"))
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Arguments forwarded to the generated run script.
pub fn run_script_args(config: &BuildConfig) -> Vec<String> {
    RUN_FLAGS
        .iter()
        .filter_map(|flag| {
            let token = (flag.token)(config);
            if token.is_none() {
                debug!(flag = flag.name, "run flag omitted");
            }
            token
        })
        .collect()
}
