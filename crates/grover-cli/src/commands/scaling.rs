//! Scaling sweep command.

use std::collections::BTreeMap;

use anyhow::Result;

use grover_search::{IterationStrategy, ScalingRecord, fit_power_law, scaling_record};

use super::common::Session;
use crate::output::{print_result, print_section, print_success, print_warning, progress_bar};
use crate::plot::scaling_chart;
use crate::report::{ScalingFit, ScalingSection};

pub const CHART_FILE: &str = "scaling.svg";

/// `(n, m)` pairs of the sweep.
pub const GRID: [(u32, u64); 7] = [(4, 1), (6, 1), (8, 1), (10, 1), (6, 4), (8, 4), (10, 4)];

/// Run `strategy` over [`GRID`], fit iterations against `√N` per marked-set
/// size and chart both.
pub async fn execute(session: &mut Session, strategy: IterationStrategy) -> Result<ScalingSection> {
    print_section(&format!("Scaling ({})", strategy.name()));

    let pb = progress_bar(GRID.len() as u64, "searching");
    let mut records = Vec::with_capacity(GRID.len());
    for (n, m) in GRID {
        pb.set_message(format!("n = {n}, M = {m}"));
        let problem = session.random_problem(n, m)?;
        match scaling_record(&session.executor, &problem, strategy).await? {
            Some(record) => records.push(record),
            None => pb.println(format!("  no iteration count found for n = {n}, M = {m}")),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    for r in &records {
        print_result(
            &format!("n = {:>2}, M = {}", r.num_qubits, r.num_marked),
            format!(
                "k = {:>2} at sqrt(N) = {:>5.2} (p = {:.4})",
                r.iterations, r.problem_size_sqrt, r.success_probability
            ),
        );
    }

    let fits = fit_by_marked_count(&records);
    for f in &fits {
        print_result(
            &format!("Fit M = {}", f.num_marked),
            format!(
                "iterations ~ {:.3} * sqrt(N)^{:.3}",
                10_f64.powf(f.fit.intercept),
                f.fit.slope
            ),
        );
    }
    if fits.is_empty() {
        print_warning("Not enough points for a power-law fit");
    }

    let pairs: Vec<_> = fits.iter().map(|f| (f.num_marked, f.fit)).collect();
    scaling_chart(&records, &pairs).write(&session.output_path(CHART_FILE))?;
    print_success(&format!("Wrote {CHART_FILE}"));

    Ok(ScalingSection {
        strategy,
        records,
        fits,
    })
}

/// One power-law fit per marked-set size that has enough points.
pub fn fit_by_marked_count(records: &[ScalingRecord]) -> Vec<ScalingFit> {
    let mut groups: BTreeMap<u64, Vec<ScalingRecord>> = BTreeMap::new();
    for r in records {
        groups.entry(r.num_marked).or_default().push(*r);
    }
    groups
        .into_iter()
        .filter_map(|(num_marked, group)| {
            fit_power_law(&group).map(|fit| ScalingFit { num_marked, fit })
        })
        .collect()
}
