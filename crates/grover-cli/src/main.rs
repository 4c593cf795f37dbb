//! grover-sim: Grover amplitude amplification on a local simulator.
//!
//! With no subcommand the full experiment sequence runs: a sanity check,
//! the oscillation sweep, the scaling sweep, the circuit diagram and the
//! unknown-M summary. Charts and the JSON report land in `--out-dir`.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use grover_cli::{Cli, commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_filter()))
        .with_target(false)
        .init();

    if let Err(e) = commands::dispatch(cli).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
