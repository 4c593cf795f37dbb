//! Unknown-M threshold scan command.

use anyhow::Result;

use grover_search::{UnknownMSummary, unknown_m_summary};

use super::common::Session;
use crate::output::{print_result, print_section, progress_bar};

/// Threshold scan for one random marked set per size.
pub async fn execute(
    session: &mut Session,
    qubits: u32,
    marked_counts: &[u64],
    threshold: f64,
) -> Result<Vec<UnknownMSummary>> {
    print_section(&format!("Unknown M (n = {qubits}, threshold {threshold})"));

    let pb = progress_bar(marked_counts.len() as u64, "scanning");
    let mut summaries = Vec::with_capacity(marked_counts.len());
    for &m in marked_counts {
        pb.set_message(format!("M = {m}"));
        let problem = session.random_problem(qubits, m)?;
        summaries.push(unknown_m_summary(&session.executor, &problem, threshold).await?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    for s in &summaries {
        let label = format!("M = {:>2}", s.num_marked);
        match &s.outcome {
            Some(o) => print_result(
                &label,
                format!(
                    "k = {:>2} (p = {:.4}, bound {})",
                    o.k, o.success_probability, s.bound
                ),
            ),
            None => print_result(&label, format!("not reached within k <= {}", s.bound)),
        }
    }

    Ok(summaries)
}
