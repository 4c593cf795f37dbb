//! Circuit execution and success-probability estimation.

use std::collections::BTreeMap;
use std::sync::Arc;

use grover_hal::{Backend, Counts};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::circuit::grover_circuit;
use crate::error::{GroverError, GroverResult};
use crate::problem::SearchProblem;

/// Shots per run when nothing else is configured.
pub const DEFAULT_SHOTS: u32 = 4096;

/// Tolerance on the total mass of an exact distribution.
const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Decoded outcome frequencies: register value -> count.
pub type OutcomeTable = BTreeMap<u64, u64>;

/// How success probabilities are estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Estimation {
    /// Fraction of `shots` sampled outcomes that are marked.
    Sampled {
        /// Shots per run.
        shots: u32,
    },
    /// Marked mass of the backend's exact outcome distribution.
    Exact,
}

impl Default for Estimation {
    fn default() -> Self {
        Estimation::Sampled {
            shots: DEFAULT_SHOTS,
        }
    }
}

/// Decode an LSB-first bitstring of exactly `width` characters.
///
/// Character `i` is bit `i` of the result. Anything other than `0` and `1`
/// is rejected, as is a string of the wrong length.
pub fn decode_outcome(bitstring: &str, width: u32) -> GroverResult<u64> {
    if width > u64::BITS {
        return Err(GroverError::MalformedOutcome(format!(
            "outcome width {width} exceeds {} bits",
            u64::BITS
        )));
    }
    if bitstring.len() != width as usize {
        return Err(GroverError::MalformedOutcome(format!(
            "outcome '{bitstring}' has {} characters, expected {width}",
            bitstring.len()
        )));
    }
    bitstring
        .bytes()
        .enumerate()
        .try_fold(0_u64, |acc, (i, b)| match b {
            b'0' => Ok(acc),
            b'1' => Ok(acc | (1 << i)),
            _ => Err(GroverError::MalformedOutcome(format!(
                "outcome '{bitstring}' contains a character other than 0 or 1"
            ))),
        })
}

/// Decode a counts table, checking it sums to exactly `shots`.
pub fn decode_counts(counts: &Counts, width: u32, shots: u32) -> GroverResult<OutcomeTable> {
    let total = counts.total_shots();
    if total != u64::from(shots) {
        return Err(GroverError::MalformedOutcome(format!(
            "counts sum to {total}, expected {shots}"
        )));
    }
    let mut table = OutcomeTable::new();
    for (bitstring, &count) in counts {
        *table.entry(decode_outcome(bitstring, width)?).or_insert(0) += count;
    }
    Ok(table)
}

/// Share of the sampled shots that landed on a marked value.
#[allow(clippy::cast_precision_loss)]
pub fn marked_fraction(table: &OutcomeTable, problem: &SearchProblem) -> f64 {
    let total: u64 = table.values().sum();
    if total == 0 {
        return 0.0;
    }
    let hits: u64 = table
        .iter()
        .filter(|(value, _)| problem.marked().contains(**value))
        .map(|(_, count)| count)
        .sum();
    hits as f64 / total as f64
}

/// Smallest value among those with the highest weight.
fn argmax<I, W>(entries: I) -> Option<u64>
where
    I: IntoIterator<Item = (u64, W)>,
    W: PartialOrd,
{
    let mut best: Option<(u64, W)> = None;
    for (value, weight) in entries {
        let better = match &best {
            None => true,
            Some((best_value, best_weight)) => {
                weight > *best_weight || (weight == *best_weight && value < *best_value)
            }
        };
        if better {
            best = Some((value, weight));
        }
    }
    best.map(|(value, _)| value)
}

/// Runs Grover circuits on a backend and reduces the results.
///
/// One backend is shared by every call and used one run at a time.
/// Backend failures propagate unchanged as [`GroverError::Backend`]; there
/// is no retry.
#[derive(Clone)]
pub struct Executor {
    backend: Arc<dyn Backend>,
    estimation: Estimation,
}

impl Executor {
    /// Create an executor with sampled estimation at [`DEFAULT_SHOTS`].
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            estimation: Estimation::default(),
        }
    }

    /// Set the estimation mode.
    #[must_use]
    pub fn with_estimation(mut self, estimation: Estimation) -> Self {
        self.estimation = estimation;
        self
    }

    /// Sample `shots` outcomes per run.
    #[must_use]
    pub fn with_shots(self, shots: u32) -> Self {
        self.with_estimation(Estimation::Sampled { shots })
    }

    /// The configured estimation mode.
    pub fn estimation(&self) -> Estimation {
        self.estimation
    }

    /// The backend in use.
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Success probability of `problem` after `k` iterations.
    #[instrument(skip(self, problem), fields(problem = %problem))]
    pub async fn run(&self, problem: &SearchProblem, k: u64) -> GroverResult<f64> {
        let p = match self.estimation {
            Estimation::Sampled { shots } => {
                let table = self.sample(problem, k, shots).await?;
                marked_fraction(&table, problem)
            }
            Estimation::Exact => {
                let dist = self.distribution(problem, k).await?;
                let mass: f64 = problem
                    .marked()
                    .iter()
                    .filter_map(|v| usize::try_from(v).ok())
                    .filter_map(|v| dist.get(v))
                    .sum();
                mass.clamp(0.0, 1.0)
            }
        };
        debug!("k={k}: success probability {p:.4}");
        Ok(p)
    }

    /// Run the circuit once with `shots` shots and decode every outcome.
    pub async fn sample(
        &self,
        problem: &SearchProblem,
        k: u64,
        shots: u32,
    ) -> GroverResult<OutcomeTable> {
        if shots == 0 {
            return Err(GroverError::InvalidProblem(
                "shot count must be at least 1".into(),
            ));
        }
        let circuit = grover_circuit(problem, k)?;
        let result = self.backend.run(&circuit, shots).await?;
        decode_counts(&result.counts, problem.num_qubits(), shots)
    }

    /// Exact outcome distribution over the index register.
    ///
    /// Entry `v` is the probability of measuring value `v`.
    pub async fn distribution(&self, problem: &SearchProblem, k: u64) -> GroverResult<Vec<f64>> {
        let circuit = grover_circuit(problem, k)?;
        let dist = self.backend.probabilities(&circuit).await?;

        let expected = usize::try_from(problem.search_space()).ok();
        if Some(dist.len()) != expected {
            return Err(GroverError::MalformedOutcome(format!(
                "distribution has {} entries, expected {}",
                dist.len(),
                problem.search_space()
            )));
        }
        let total: f64 = dist.iter().sum();
        #[allow(clippy::cast_precision_loss)]
        let tolerance = PROBABILITY_TOLERANCE * dist.len().max(1) as f64;
        if (total - 1.0).abs() > tolerance {
            return Err(GroverError::MalformedOutcome(format!(
                "distribution sums to {total}, expected 1"
            )));
        }
        Ok(dist)
    }

    /// The most probable decoded outcome after `k` iterations.
    ///
    /// Ties go to the smallest value.
    pub async fn most_likely_outcome(&self, problem: &SearchProblem, k: u64) -> GroverResult<u64> {
        let best = match self.estimation {
            Estimation::Sampled { shots } => {
                argmax(self.sample(problem, k, shots).await?)
            }
            Estimation::Exact => {
                let dist = self.distribution(problem, k).await?;
                argmax((0_u64..).zip(dist))
            }
        };
        best.ok_or_else(|| GroverError::MalformedOutcome("backend returned no outcomes".into()))
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("backend", &self.backend.name())
            .field("estimation", &self.estimation)
            .finish()
    }
}
