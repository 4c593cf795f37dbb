//! CLI command implementations.

pub mod all;
pub mod common;
pub mod diagram;
pub mod oscillations;
pub mod run;
pub mod sanity;
pub mod scaling;
pub mod unknown;
pub mod version;

use anyhow::Result;

use crate::cli::{Cli, Commands};
pub use common::Session;

/// Run the command selected on the command line.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::All);
    if let Commands::Version = command {
        version::execute();
        return Ok(());
    }

    let mut session = Session::new(&cli.options)?;
    match command {
        Commands::All => all::execute(&mut session).await.map(|_| ()),

        Commands::Sanity => sanity::execute(&session).await.map(|_| ()),

        Commands::Oscillations {
            qubits,
            marked_counts,
            max_iterations,
        } => oscillations::execute(&mut session, qubits, &marked_counts, max_iterations)
            .await
            .map(|_| ()),

        Commands::Scaling {
            strategy,
            threshold,
        } => scaling::execute(&mut session, strategy.into_strategy(threshold))
            .await
            .map(|_| ()),

        Commands::Diagram {
            qubits,
            marked,
            iterations,
            width,
        } => diagram::execute(&session, qubits, &marked, iterations, width).map(|_| ()),

        Commands::Unknown {
            qubits,
            marked_counts,
            threshold,
        } => unknown::execute(&mut session, qubits, &marked_counts, threshold)
            .await
            .map(|_| ()),

        Commands::Run {
            qubits,
            marked,
            iterations,
        } => run::execute(&session, qubits, &marked, iterations, cli.options.shots)
            .await
            .map(|_| ()),

        Commands::Version => Ok(()),
    }
}
