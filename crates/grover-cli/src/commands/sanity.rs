//! Sanity check on the smallest interesting search.

use anyhow::Result;
use tracing::warn;

use grover_search::SearchProblem;

use super::common::Session;
use crate::output::{print_result, print_section, print_success, print_warning};
use crate::report::SanityCheck;

const QUBITS: u32 = 4;
const MARKED: u64 = 3;
const ITERATIONS: u64 = 3;

/// Expected success probability at three iterations is about 0.96.
const MIN_SUCCESS: f64 = 0.9;

/// Search 16 states for the value 3 with three iterations.
pub async fn execute(session: &Session) -> Result<SanityCheck> {
    print_section("Sanity check");
    let problem = SearchProblem::new(QUBITS, [MARKED])?;

    let success_probability = session.executor.run(&problem, ITERATIONS).await?;
    let most_likely_outcome = session
        .executor
        .most_likely_outcome(&problem, ITERATIONS)
        .await?;

    print_result("Problem", &problem);
    print_result("Iterations", ITERATIONS);
    print_result("Success probability", format!("{success_probability:.4}"));
    print_result("Most likely outcome", most_likely_outcome);

    if success_probability >= MIN_SUCCESS && most_likely_outcome == MARKED {
        print_success("Marked value found with high probability");
    } else {
        warn!("Sanity check below expectations: p={success_probability:.4}");
        print_warning("Sanity check below expectations");
    }

    Ok(SanityCheck {
        num_qubits: QUBITS,
        marked: problem.marked().iter().collect(),
        iterations: ITERATIONS,
        success_probability,
        most_likely_outcome,
    })
}
