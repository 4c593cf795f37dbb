//! Oscillation sweep command.

use anyhow::Result;

use grover_search::{OscillationSeries, oscillation_series};

use super::common::Session;
use crate::output::{print_result, print_section, print_success, progress_bar};
use crate::plot::oscillation_chart;

pub const CHART_FILE: &str = "oscillations.svg";

/// Sweep `k = 0..=max_iterations` for one random marked set per size and
/// chart the curves.
pub async fn execute(
    session: &mut Session,
    qubits: u32,
    marked_counts: &[u64],
    max_iterations: u64,
) -> Result<Vec<OscillationSeries>> {
    print_section(&format!("Oscillations (n = {qubits}, k = 0..={max_iterations})"));

    let pb = progress_bar(marked_counts.len() as u64, "sweeping");
    let mut all = Vec::with_capacity(marked_counts.len());
    for &m in marked_counts {
        let problem = session.random_problem(qubits, m)?;
        pb.set_message(format!("M = {m}"));
        let series = oscillation_series(&session.executor, &problem, 0..=max_iterations).await?;
        pb.inc(1);
        all.push(series);
    }
    pb.finish_and_clear();

    for series in &all {
        if let Some(peak) = series.peak() {
            print_result(
                &format!("M = {:>2} peak", series.marked.len()),
                format!("k = {:>2}, p = {:.4}", peak.k, peak.success_probability),
            );
        }
    }

    oscillation_chart(&all).write(&session.output_path(CHART_FILE))?;
    print_success(&format!("Wrote {CHART_FILE}"));
    Ok(all)
}
