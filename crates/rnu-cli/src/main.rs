//! CLI entry point - the composition root.
//!
//! Parses arguments, wires the runtime adapters via bootstrap and maps the
//! launch result to a process exit code.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use rnu_cli::{Cli, CliConfig, CliError, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    // RUST_LOG wins; otherwise -v selects debug output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = bootstrap(CliConfig::from_cli(&cli))?;
    handlers::run::execute(&ctx).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads RNU_* overrides
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(cli_err) = err.downcast_ref::<CliError>() {
                // Reporter already printed the user-facing diagnostic
                tracing::debug!("{cli_err}");
                let code = u8::try_from(cli_err.exit_code()).unwrap_or(1);
                ExitCode::from(code)
            } else {
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        }
    }
}
