//! Experiment sweeps built on the executor and the searches.
//!
//! Each function produces serializable records; rendering them is left to
//! the caller.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::GroverResult;
use crate::executor::Executor;
use crate::problem::{MarkedSet, SearchProblem};
use crate::search::{IterationStrategy, SearchOutcome, iteration_bound, search_unknown_m};

/// Success probability at one iteration count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillationPoint {
    /// Iteration count.
    pub k: u64,
    /// Success probability after `k` iterations.
    pub success_probability: f64,
}

/// Success probability as a function of `k` for one problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillationSeries {
    /// Index register width.
    pub num_qubits: u32,
    /// The marked values.
    pub marked: MarkedSet,
    /// One point per evaluated `k`, ascending.
    pub points: Vec<OscillationPoint>,
}

impl OscillationSeries {
    /// The point with the highest success probability (first on ties).
    pub fn peak(&self) -> Option<&OscillationPoint> {
        self.points.iter().fold(None, |best, p| match best {
            Some(b) if b.success_probability >= p.success_probability => Some(b),
            _ => Some(p),
        })
    }
}

/// Evaluate `problem` at every `k` in `ks`.
#[instrument(skip(executor, problem), fields(problem = %problem))]
pub async fn oscillation_series(
    executor: &Executor,
    problem: &SearchProblem,
    ks: RangeInclusive<u64>,
) -> GroverResult<OscillationSeries> {
    let mut points = Vec::new();
    for k in ks {
        let success_probability = executor.run(problem, k).await?;
        points.push(OscillationPoint {
            k,
            success_probability,
        });
    }
    Ok(OscillationSeries {
        num_qubits: problem.num_qubits(),
        marked: problem.marked().clone(),
        points,
    })
}

/// One point of the scaling law: iterations needed at a problem size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingRecord {
    /// Index register width.
    pub num_qubits: u32,
    /// Number of marked values.
    pub num_marked: u64,
    /// `√N` with `N = 2ⁿ`.
    pub problem_size_sqrt: f64,
    /// Iteration count chosen by the strategy.
    pub iterations: u64,
    /// Success probability at that count.
    pub success_probability: f64,
}

/// Run `strategy` on `problem` and turn the result into a scaling record.
///
/// `None` means the strategy found no iteration count.
#[instrument(skip(executor, problem), fields(problem = %problem, strategy = strategy.name()))]
pub async fn scaling_record(
    executor: &Executor,
    problem: &SearchProblem,
    strategy: IterationStrategy,
) -> GroverResult<Option<ScalingRecord>> {
    let Some(outcome) = strategy.find(executor, problem).await? else {
        warn!("No iteration count found for {problem}");
        return Ok(None);
    };
    #[allow(clippy::cast_precision_loss)]
    let problem_size_sqrt = (problem.search_space() as f64).sqrt();
    Ok(Some(ScalingRecord {
        num_qubits: problem.num_qubits(),
        num_marked: problem.num_marked(),
        problem_size_sqrt,
        iterations: outcome.k,
        success_probability: outcome.success_probability,
    }))
}

/// Least-squares line through `(log10 x, log10 y)`.
///
/// `y ≈ 10^intercept · x^slope`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLawFit {
    /// Exponent of the power law.
    pub slope: f64,
    /// `log10` of the prefactor.
    pub intercept: f64,
}

impl PowerLawFit {
    /// Evaluate the fitted law at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        10_f64.powf(self.intercept) * x.powf(self.slope)
    }
}

/// Fit iterations against `√N`.
///
/// Needs at least two records with distinct `√N`; returns `None` otherwise.
#[allow(clippy::cast_precision_loss)]
pub fn fit_power_law(records: &[ScalingRecord]) -> Option<PowerLawFit> {
    let points: Vec<(f64, f64)> = records
        .iter()
        .filter(|r| r.problem_size_sqrt > 0.0 && r.iterations > 0)
        .map(|r| (r.problem_size_sqrt.log10(), (r.iterations as f64).log10()))
        .collect();
    if points.len() < 2 {
        return None;
    }

    let count = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / count;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / count;
    let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    let sxy: f64 = points
        .iter()
        .map(|p| (p.0 - mean_x) * (p.1 - mean_y))
        .sum();
    if sxx <= f64::EPSILON {
        return None;
    }

    let slope = sxy / sxx;
    Some(PowerLawFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Threshold-scan result for one problem, with the bound that was used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownMSummary {
    /// Index register width.
    pub num_qubits: u32,
    /// Number of marked values.
    pub num_marked: u64,
    /// Target success probability.
    pub threshold: f64,
    /// Largest `k` the scan was allowed to try.
    pub bound: u64,
    /// Search result, `None` if the bound was exhausted.
    pub outcome: Option<SearchOutcome>,
}

/// Run the threshold scan on `problem` and record the bound alongside.
pub async fn unknown_m_summary(
    executor: &Executor,
    problem: &SearchProblem,
    threshold: f64,
) -> GroverResult<UnknownMSummary> {
    let m = problem.require_marked()?;
    let bound = iteration_bound(problem.num_qubits(), m)?;
    let outcome = search_unknown_m(executor, problem, threshold).await?;
    Ok(UnknownMSummary {
        num_qubits: problem.num_qubits(),
        num_marked: m,
        threshold,
        bound,
        outcome,
    })
}
