// Entrypoint for the CLI.
// - Reads configuration and the single directory argument, then hands
//   over to `app::run`.
// - Any failure is printed to stderr and exits with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use smokeshow::{app, ui::Reporter, Config};
use tracing_subscriber::EnvFilter;

/// Upload a directory to a temporary smokeshow site.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory to upload.
    path: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help / --version
            err.print()?;
            return Ok(());
        }
        Err(err) => anyhow::bail!("{err}"),
    };

    let config = Config::from_env().context("reading configuration")?;
    app::run(&config, &cli.path, &Reporter::new()).await?;
    Ok(())
}
