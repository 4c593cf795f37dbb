//! Iteration-count search.
//!
//! Two strategies are offered:
//!
//! - **Local search** (known `m`): anchor on the closed-form optimum `k*`
//!   and evaluate `k* - 1`, `k*` and `k* + 1`, since discretization can put
//!   the true peak one step away from the estimate.
//! - **Threshold scan** (unknown `m`): walk `k = 1, 2, ...` up to a bound of
//!   roughly twice the optimum and stop at the first `k` that reaches the
//!   target probability.
//!
//! Running out of candidates in the scan is reported as `None`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{GroverError, GroverResult};
use crate::executor::Executor;
use crate::problem::SearchProblem;

/// Default success threshold for the threshold scan.
pub const DEFAULT_THRESHOLD: f64 = 0.95;

/// Slack added to the scan bound.
const BOUND_SLACK: u64 = 5;

/// Result of an iteration-count search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Chosen iteration count.
    pub k: u64,
    /// Success probability measured at `k`.
    pub success_probability: f64,
    /// Number of circuits executed to find `k`.
    pub evaluations: u64,
}

fn rotation_angle(n: u32, m: u64) -> GroverResult<f64> {
    if m == 0 {
        return Err(GroverError::InvalidProblem(
            "iteration count is undefined without marked values".into(),
        ));
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = m as f64 / 2_f64.powi(n.try_into().unwrap_or(i32::MAX));
    Ok(ratio.sqrt().clamp(-1.0, 1.0).asin())
}

/// Closed-form optimum `floor(π / (4·asin(√(m/2ⁿ))))`.
///
/// The `asin` argument is clamped to `[-1, 1]`, so `m = 2ⁿ` yields 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn analytic_optimum(n: u32, m: u64) -> GroverResult<u64> {
    let theta = rotation_angle(n, m)?;
    Ok((PI / (4.0 * theta)).floor() as u64)
}

/// Upper end of the threshold scan, `2·ceil((π/4)·√(2ⁿ/m)) + 5`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn iteration_bound(n: u32, m: u64) -> GroverResult<u64> {
    if m == 0 {
        return Err(GroverError::InvalidProblem(
            "iteration bound is undefined without marked values".into(),
        ));
    }
    let ratio = 2_f64.powi(n.try_into().unwrap_or(i32::MAX)) / m as f64;
    let half = (PI / 4.0 * ratio.sqrt()).ceil() as u64;
    Ok(half.saturating_mul(2).saturating_add(BOUND_SLACK))
}

/// The distinct local-search candidates around `k_star`, each at least 1.
fn local_candidates(k_star: u64) -> Vec<u64> {
    let mut candidates: Vec<u64> = [k_star.saturating_sub(1), k_star, k_star.saturating_add(1)]
        .into_iter()
        .map(|k| k.max(1))
        .collect();
    candidates.dedup();
    candidates
}

/// Best of `k* - 1`, `k*`, `k* + 1` for a problem whose `m` is known.
///
/// Ties go to the smaller `k`.
#[instrument(skip(executor, problem), fields(problem = %problem))]
pub async fn search_known_m(
    executor: &Executor,
    problem: &SearchProblem,
) -> GroverResult<SearchOutcome> {
    let m = problem.require_marked()?;
    let k_star = analytic_optimum(problem.num_qubits(), m)?;
    debug!("Analytic optimum k* = {k_star}");

    let mut best: Option<SearchOutcome> = None;
    let mut evaluations = 0;
    for k in local_candidates(k_star) {
        let p = executor.run(problem, k).await?;
        evaluations += 1;
        if best.is_none_or(|b| p > b.success_probability) {
            best = Some(SearchOutcome {
                k,
                success_probability: p,
                evaluations: 0,
            });
        }
    }

    let outcome = best
        .map(|b| SearchOutcome { evaluations, ..b })
        .ok_or_else(|| GroverError::InvalidProblem("no candidate iteration counts".into()))?;
    info!(
        "Local search picked k={} (p={:.4})",
        outcome.k, outcome.success_probability
    );
    Ok(outcome)
}

/// First `k` in `1..=iteration_bound` whose success probability reaches
/// `threshold`, or `None` if the bound is exhausted.
///
/// The marked set only scores runs; the scan itself never looks at `m`
/// beyond computing the bound.
#[instrument(skip(executor, problem), fields(problem = %problem))]
pub async fn search_unknown_m(
    executor: &Executor,
    problem: &SearchProblem,
    threshold: f64,
) -> GroverResult<Option<SearchOutcome>> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(GroverError::InvalidProblem(format!(
            "threshold must be within [0, 1], got {threshold}"
        )));
    }
    let m = problem.require_marked()?;
    let bound = iteration_bound(problem.num_qubits(), m)?;
    debug!("Scanning k = 1..={bound}");

    for k in 1..=bound {
        let p = executor.run(problem, k).await?;
        if p >= threshold {
            info!("Threshold {threshold} reached at k={k} (p={p:.4})");
            return Ok(Some(SearchOutcome {
                k,
                success_probability: p,
                evaluations: k,
            }));
        }
    }

    info!("Threshold {threshold} not reached within k <= {bound}");
    Ok(None)
}

/// How to pick an iteration count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IterationStrategy {
    /// Local search around the closed-form optimum.
    LocalSearch,
    /// First `k` reaching `threshold`.
    ThresholdScan {
        /// Target success probability.
        threshold: f64,
    },
}

impl Default for IterationStrategy {
    fn default() -> Self {
        IterationStrategy::ThresholdScan {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl IterationStrategy {
    /// Short name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            IterationStrategy::LocalSearch => "local-search",
            IterationStrategy::ThresholdScan { .. } => "threshold-scan",
        }
    }

    /// Run the strategy. Local search always produces a result.
    pub async fn find(
        &self,
        executor: &Executor,
        problem: &SearchProblem,
    ) -> GroverResult<Option<SearchOutcome>> {
        match *self {
            IterationStrategy::LocalSearch => search_known_m(executor, problem).await.map(Some),
            IterationStrategy::ThresholdScan { threshold } => {
                search_unknown_m(executor, problem, threshold).await
            }
        }
    }
}
