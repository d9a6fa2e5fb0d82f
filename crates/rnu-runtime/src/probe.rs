//! HTTP probe for the packager's status endpoint.

use async_trait::async_trait;
use reqwest::Client;
use rnu_core::ports::{ServerProbe, ServerState};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Body a live packager returns from `/status`.
pub const PACKAGER_RUNNING_BODY: &str = "packager-status:running";

/// Default per-request timeout for the probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors constructing the probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Classify a `/status` response body. Only the exact running marker
/// counts; surrounding whitespace makes it unrecognized.
pub fn classify_status_body(body: &str) -> ServerState {
    if body == PACKAGER_RUNNING_BODY {
        ServerState::Running
    } else {
        ServerState::Unrecognized
    }
}

/// Probes `http://<host>:<port>/status` with a single request.
#[derive(Debug, Clone)]
pub struct HttpPackagerProbe {
    client: Client,
}

impl HttpPackagerProbe {
    pub fn new() -> Result<Self, ProbeError> {
        Self::with_timeout(DEFAULT_PROBE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ProbeError> {
        // Proxies would turn a local "connection refused" into a proxy error page
        let client = Client::builder().timeout(timeout).no_proxy().build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ServerProbe for HttpPackagerProbe {
    async fn probe(&self, host: &str, port: &str) -> ServerState {
        let status_url = format!("http://{host}:{port}/status");

        match self.client.get(&status_url).send().await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => {
                        debug!(%status_url, %status, "packager status response");
                        classify_status_body(&body)
                    }
                    Err(e) => {
                        debug!(%status_url, "failed to read status body: {e}");
                        ServerState::Unrecognized
                    }
                }
            }
            Err(e) => {
                debug!(%status_url, "packager not reachable: {e}");
                ServerState::NotRunning
            }
        }
    }
}
