//! Single search run command.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use grover_search::{Estimation, OutcomeTable, SearchProblem, analytic_optimum, marked_fraction};

use super::common::Session;
use crate::output::{print_histogram, print_result};

/// What a single run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub iterations: u64,
    pub outcomes: OutcomeTable,
    pub success_probability: f64,
}

/// Run one search circuit and print the decoded outcomes.
///
/// Without `iterations` the closed-form optimum for the marked-set size is
/// used. The histogram is always sampled. In sampled mode the success
/// probability is read off that same histogram; in exact mode it comes from
/// the backend's distribution.
pub async fn execute(
    session: &Session,
    qubits: u32,
    marked: &[u64],
    iterations: Option<u64>,
    shots: u32,
) -> Result<RunSummary> {
    let problem = SearchProblem::new(qubits, marked.iter().copied())?;
    let k = match iterations {
        Some(k) => k,
        None if problem.marked().is_empty() => 0,
        None => analytic_optimum(qubits, problem.num_marked())?,
    };

    println!(
        "{} Searching {} with {} iterations ({} shots)",
        style("→").cyan().bold(),
        style(&problem).green(),
        style(k).yellow(),
        shots
    );

    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message("Simulating...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let table = session.executor.sample(&problem, k, shots).await?;
    let (mode, success_probability) = match session.executor.estimation() {
        Estimation::Exact => ("exact", session.executor.run(&problem, k).await?),
        Estimation::Sampled { .. } => ("sampled", marked_fraction(&table, &problem)),
    };
    spinner.finish_and_clear();

    println!("\n{} Outcomes ({} shots):", style("✓").green().bold(), shots);
    print_histogram(&table, qubits, |v| problem.marked().contains(v));

    println!();
    print_result(
        &format!("Success probability ({mode})"),
        format!("{success_probability:.4}"),
    );
    Ok(RunSummary {
        iterations: k,
        outcomes: table,
        success_probability,
    })
}
