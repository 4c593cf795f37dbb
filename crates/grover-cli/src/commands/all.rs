//! The full experiment sequence.

use anyhow::Result;
use tracing::info;

use grover_search::{DEFAULT_THRESHOLD, IterationStrategy};

use super::common::Session;
use super::{diagram, oscillations, sanity, scaling, unknown};
use crate::output::{print_header, print_success};
use crate::report::Report;

pub const REPORT_FILE: &str = "grover_report.json";

const OSCILLATION_QUBITS: u32 = 8;
const OSCILLATION_MARKED: [u64; 3] = [1, 4, 16];
const OSCILLATION_MAX_K: u64 = 16;

const DIAGRAM_QUBITS: u32 = 4;
const DIAGRAM_MARKED: [u64; 1] = [3];
const DIAGRAM_ITERATIONS: u64 = 2;

/// Sanity check, oscillations, scaling, diagram and unknown-M summary, in
/// that order, followed by the JSON report.
pub async fn execute(session: &mut Session) -> Result<Report> {
    print_header("Grover amplitude amplification");
    let mut report = Report::new(session.seed, session.executor.estimation());

    report.sanity = Some(sanity::execute(session).await?);

    report.oscillations = oscillations::execute(
        session,
        OSCILLATION_QUBITS,
        &OSCILLATION_MARKED,
        OSCILLATION_MAX_K,
    )
    .await?;
    report.artifacts.push(oscillations::CHART_FILE.to_string());

    let strategy = IterationStrategy::ThresholdScan {
        threshold: DEFAULT_THRESHOLD,
    };
    report.scaling = Some(scaling::execute(session, strategy).await?);
    report.artifacts.push(scaling::CHART_FILE.to_string());

    report.artifacts.extend(diagram::execute(
        session,
        DIAGRAM_QUBITS,
        &DIAGRAM_MARKED,
        DIAGRAM_ITERATIONS,
        None,
    )?);

    report.unknown_m = unknown::execute(
        session,
        OSCILLATION_QUBITS,
        &OSCILLATION_MARKED,
        DEFAULT_THRESHOLD,
    )
    .await?;

    let path = session.output_path(REPORT_FILE);
    report.write(&path)?;
    info!("Report written to {}", path.display());

    println!();
    print_success(&format!(
        "All experiments complete; outputs in {}",
        session.out_dir().display()
    ));
    Ok(report)
}
