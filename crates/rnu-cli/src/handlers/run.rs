//! Run command handler.
//!
//! Builds the Ubuntu app and starts it, launching the packager first if
//! none is listening.

use rnu_core::LaunchReport;
use tracing::{debug, info};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the build-and-run sequence.
pub async fn execute(ctx: &CliContext) -> Result<LaunchReport, CliError> {
    let build = &ctx.config.build;
    debug!(
        root = %build.root().display(),
        live_reload = build.live_reload(),
        host = build.host(),
        port = build.port(),
        "starting launch"
    );

    let report = ctx.orchestrator.launch(build).await?;
    info!(
        server_spawned = report.server_spawned,
        final_state = ?report.final_state,
        "launch finished"
    );
    Ok(report)
}
